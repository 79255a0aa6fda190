//! Wire-format objects exactly as the pod serializes them.
//!
//! Almost every field is an `Option`: the pod omits attributes it has no
//! value for, and a client that insists on them breaks the first time the
//! server drops one. Deciding which fields are *required* is the entity
//! mapper's job (`parley-model`), not this module's.
//!
//! `#[serde(rename_all = "camelCase")]` maps `members_can_invite` to the
//! pod's `membersCanInvite`. `skip_serializing_if` keeps request bodies
//! free of `null`s so an update only touches the attributes it carries.

use serde::{Deserialize, Deserializer, Serialize};

use crate::UserId;

// ---------------------------------------------------------------------------
// Streams
// ---------------------------------------------------------------------------

/// Response of `POST /pod/v1/im/create`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreamIdResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// The `{"type": "IM"}` object nested in stream attributes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreamType {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Member list of an IM or multi-party IM.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConversationAttributes {
    #[serde(default, deserialize_with = "null_as_default")]
    pub members: Vec<UserId>,
}

/// Room-specific part of stream attributes (only set for rooms).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoomSpecificAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Response of `GET /pod/v1/streams/{id}/info`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_pod: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_type: Option<StreamType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_attributes: Option<ConversationAttributes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_attributes: Option<RoomSpecificAttributes>,
}

// ---------------------------------------------------------------------------
// Rooms
// ---------------------------------------------------------------------------

/// One `{"key": ..., "value": ...}` tag on a room.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeywordPair {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Room attributes, sent on create/update and returned inside
/// [`RoomDetail`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<KeywordPair>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members_can_invite: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discoverable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copy_protected: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_pod: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_history: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_lateral_room: Option<bool>,
}

/// Server-owned facts about a room.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSystemInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Milliseconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Response of room create/info/update/setActive.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_attributes: Option<RoomAttributes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_system_info: Option<RoomSystemInfo>,
}

// ---------------------------------------------------------------------------
// Room search
// ---------------------------------------------------------------------------

/// `{"id": 123}`, how the pod references a user inside other objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: UserId,
}

/// Body of `POST /pod/v2/room/search`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSearchCriteria {
    #[serde(default, deserialize_with = "null_as_default")]
    pub query: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<UserRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<UserRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<UserRef>,
    /// `"BASIC"` or `"RELEVANCE"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
}

/// How many results matched one facet of the query.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FacetedMatchCount {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

/// Response of `POST /pod/v2/room/search`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSearchResults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<RoomSearchCriteria>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rooms: Vec<RoomDetail>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub faceted_match_count: Vec<FacetedMatchCount>,
}

// ---------------------------------------------------------------------------
// Room membership
// ---------------------------------------------------------------------------

/// One entry of `GET /pod/v2/room/{id}/membership/list`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_date: Option<i64>,
}

/// Generic `{"format": "TEXT", "message": "Member added"}` acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SuccessResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Authentication and errors
// ---------------------------------------------------------------------------

/// Response of the session-auth and key-manager authenticate endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuthToken {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Body the pod returns alongside a non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Reads an explicit `null` the same way as a missing key. Some pod
/// versions send `"keywords": null` for an empty list.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    //! The pod defines exact JSON shapes. These tests pin the serde
    //! attributes, because a mismatch means requests the pod silently
    //! ignores.

    use super::*;

    #[test]
    fn test_room_attributes_use_camel_case_field_names() {
        let attrs = RoomAttributes {
            name: Some("ops".into()),
            members_can_invite: Some(true),
            multi_lateral_room: Some(false),
            ..RoomAttributes::default()
        };
        let json = serde_json::to_value(&attrs).unwrap();

        assert_eq!(json["name"], "ops");
        assert_eq!(json["membersCanInvite"], true);
        assert_eq!(json["multiLateralRoom"], false);
    }

    #[test]
    fn test_room_attributes_skip_absent_fields() {
        // An update that only renames must not send `"readOnly": null`.
        let attrs = RoomAttributes {
            name: Some("renamed".into()),
            ..RoomAttributes::default()
        };
        let json = serde_json::to_string(&attrs).unwrap();
        assert_eq!(json, r#"{"name":"renamed"}"#);
    }

    #[test]
    fn test_room_detail_parses_pod_response() {
        let body = r#"{
            "roomAttributes": {
                "name": "ops",
                "keywords": [{"key": "region", "value": "emea"}],
                "public": false
            },
            "roomSystemInfo": {
                "id": "room-7",
                "creationDate": 1461426797875,
                "createdByUserId": 7078106103809,
                "active": true
            }
        }"#;
        let detail: RoomDetail = serde_json::from_str(body).unwrap();

        let attrs = detail.room_attributes.unwrap();
        assert_eq!(attrs.keywords.len(), 1);
        assert_eq!(attrs.public, Some(false));
        let info = detail.room_system_info.unwrap();
        assert_eq!(info.id.as_deref(), Some("room-7"));
        assert_eq!(info.created_by_user_id, Some(UserId(7078106103809)));
        assert_eq!(info.active, Some(true));
    }

    #[test]
    fn test_null_collections_decode_as_empty() {
        let attrs: RoomAttributes =
            serde_json::from_str(r#"{"name": "ops", "keywords": null}"#).unwrap();
        assert!(attrs.keywords.is_empty());

        let results: RoomSearchResults =
            serde_json::from_str(r#"{"rooms": null, "facetedMatchCount": null}"#).unwrap();
        assert!(results.rooms.is_empty());

        let stream: StreamAttributes =
            serde_json::from_str(r#"{"id": "im-1", "streamAttributes": {"members": null}}"#).unwrap();
        assert!(stream.stream_attributes.unwrap().members.is_empty());

        let criteria: RoomSearchCriteria =
            serde_json::from_str(r#"{"query": null, "labels": null}"#).unwrap();
        assert_eq!(criteria, RoomSearchCriteria::default());
    }

    #[test]
    fn test_stream_attributes_parses_nested_type_and_members() {
        let body = r#"{
            "id": "im-1",
            "crossPod": false,
            "active": true,
            "streamType": {"type": "IM"},
            "streamAttributes": {"members": [1, 101, 102]}
        }"#;
        let attrs: StreamAttributes = serde_json::from_str(body).unwrap();

        assert_eq!(attrs.stream_type.unwrap().kind.as_deref(), Some("IM"));
        assert_eq!(
            attrs.stream_attributes.unwrap().members,
            vec![UserId(1), UserId(101), UserId(102)]
        );
        assert!(attrs.room_attributes.is_none());
    }

    #[test]
    fn test_search_criteria_serializes_user_refs() {
        let criteria = RoomSearchCriteria {
            query: "ops".into(),
            owner: Some(UserRef { id: UserId(5) }),
            sort_order: Some("RELEVANCE".into()),
            ..RoomSearchCriteria::default()
        };
        let json = serde_json::to_value(&criteria).unwrap();

        assert_eq!(json["query"], "ops");
        assert_eq!(json["owner"]["id"], 5);
        assert_eq!(json["sortOrder"], "RELEVANCE");
        assert!(json.get("labels").is_none());
    }

    #[test]
    fn test_search_results_default_missing_lists_to_empty() {
        let results: RoomSearchResults =
            serde_json::from_str(r#"{"count": 0}"#).unwrap();
        assert!(results.rooms.is_empty());
        assert!(results.faceted_match_count.is_empty());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        // The pod adds attributes over time; older clients must keep working.
        let body = r#"{"id": "abc", "pinnedMessageId": "xyz"}"#;
        let stream: StreamIdResponse = serde_json::from_str(body).unwrap();
        assert_eq!(stream.id.as_deref(), Some("abc"));
    }
}
