//! Placing caller-supplied ids into pod paths.

use std::borrow::Cow;

use crate::{Operation, ParleyError};

/// Percent-encodes `id` as exactly one path segment.
///
/// `/`, `?`, `#`, `+` and `=` are all escaped, so a standard-base64 id such
/// as `AB+c/d==` stays inside its segment. An empty id or a bare dot
/// segment would still change which endpoint the path names, and is
/// rejected.
pub(crate) fn segment(operation: Operation, id: &str) -> Result<Cow<'_, str>, ParleyError> {
    match id {
        "" | "." | ".." => Err(ParleyError::invalid_argument(
            operation,
            format!("{id:?} is not a usable id"),
        )),
        _ => Ok(urlencoding::encode(id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_leaves_plain_ids_alone() {
        let encoded = segment(Operation::RoomInfo, "xhGxbTcvTDK6EIMMrwdOrX___quztr2HdA").unwrap();
        assert!(matches!(encoded, Cow::Borrowed(_)));
        assert_eq!(encoded, "xhGxbTcvTDK6EIMMrwdOrX___quztr2HdA");
    }

    #[test]
    fn test_segment_escapes_reserved_characters() {
        assert_eq!(segment(Operation::RoomInfo, "AB+c/d==").unwrap(), "AB%2Bc%2Fd%3D%3D");
        assert_eq!(
            segment(Operation::SetRoomActive, "abc/../../v1/admin/x?").unwrap(),
            "abc%2F..%2F..%2Fv1%2Fadmin%2Fx%3F"
        );
        assert_eq!(segment(Operation::StreamInfo, "a#b").unwrap(), "a%23b");
    }

    #[test]
    fn test_segment_rejects_empty_and_dot_segments() {
        for id in ["", ".", ".."] {
            let err = segment(Operation::RoomInfo, id).unwrap_err();
            assert!(matches!(err, ParleyError::InvalidArgument(_)), "id {id:?}");
        }
    }
}
