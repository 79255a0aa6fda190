//! Room search: criteria going out, paged results coming back.

use parley_protocol::{UserId, wire};
use serde::{Deserialize, Serialize};

use crate::error::required;
use crate::{ModelError, RoomDetail};

/// How search results are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    /// Active rooms first, then alphabetically.
    Basic,
    /// By how well the room matches the query.
    Relevance,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "BASIC",
            Self::Relevance => "RELEVANCE",
        }
    }
}

/// What to search for.
///
/// The query string is matched against room names, descriptions and
/// keywords; every other criterion narrows the result set.
///
/// ```rust
/// use parley_model::{RoomSearchCriteria, SortOrder};
/// use parley_protocol::UserId;
///
/// let criteria = RoomSearchCriteria::new("incident")
///     .active(true)
///     .member(UserId(7))
///     .sort_order(SortOrder::Relevance);
/// assert_eq!(criteria.query, "incident");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoomSearchCriteria {
    pub query: String,
    pub labels: Vec<String>,
    pub active: Option<bool>,
    pub private: Option<bool>,
    pub owner: Option<UserId>,
    pub creator: Option<UserId>,
    pub member: Option<UserId>,
    pub sort_order: Option<SortOrder>,
}

impl RoomSearchCriteria {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn private(mut self, private: bool) -> Self {
        self.private = Some(private);
        self
    }

    pub fn owner(mut self, user: UserId) -> Self {
        self.owner = Some(user);
        self
    }

    pub fn creator(mut self, user: UserId) -> Self {
        self.creator = Some(user);
        self
    }

    pub fn member(mut self, user: UserId) -> Self {
        self.member = Some(user);
        self
    }

    pub fn sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = Some(order);
        self
    }

    /// `true` if the query has at least one non-whitespace character. The
    /// pod refuses blank queries.
    pub fn has_query(&self) -> bool {
        !self.query.trim().is_empty()
    }
}

impl From<&RoomSearchCriteria> for wire::RoomSearchCriteria {
    fn from(criteria: &RoomSearchCriteria) -> Self {
        Self {
            query: criteria.query.clone(),
            labels: criteria.labels.clone(),
            active: criteria.active,
            private: criteria.private,
            owner: criteria.owner.map(|id| wire::UserRef { id }),
            creator: criteria.creator.map(|id| wire::UserRef { id }),
            member: criteria.member.map(|id| wire::UserRef { id }),
            sort_order: criteria.sort_order.map(|o| o.as_str().to_owned()),
        }
    }
}

/// How many results matched one facet of the query (`"name"`,
/// `"keywords"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCount {
    pub facet: String,
    pub count: u64,
}

/// One page of room search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSearchResults {
    /// Total matches across all pages.
    pub count: u64,
    pub skip: u64,
    pub limit: u64,
    pub rooms: Vec<RoomDetail>,
    pub facets: Vec<FacetCount>,
}

impl RoomSearchResults {
    /// `true` if more rooms exist past this page.
    pub fn has_more(&self) -> bool {
        self.skip + (self.rooms.len() as u64) < self.count
    }
}

impl TryFrom<wire::RoomSearchResults> for RoomSearchResults {
    type Error = ModelError;

    fn try_from(value: wire::RoomSearchResults) -> Result<Self, ModelError> {
        let rooms = value
            .rooms
            .into_iter()
            .map(RoomDetail::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let facets = value
            .faceted_match_count
            .into_iter()
            .map(|f| -> Result<FacetCount, ModelError> {
                Ok(FacetCount {
                    facet: required(f.facet, "facetedMatchCount.facet")?,
                    count: f.count.unwrap_or(0),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            count: value.count.unwrap_or(rooms.len() as u64),
            skip: value.skip.unwrap_or(0),
            limit: value.limit.unwrap_or(0),
            rooms,
            facets,
        })
    }
}
