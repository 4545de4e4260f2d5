use serde::Deserialize;

use super::repo_types::ProfileStatus;

pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}
fn default_limit() -> i64 {
    20
}

impl Pagination {
    /// `(limit, offset)` clamped to what the store accepts.
    pub fn bounds(&self) -> (i64, i64) {
        (self.limit.clamp(1, MAX_LIMIT), self.offset.max(0))
    }
}

#[derive(Debug, Deserialize)]
pub struct AdminListQuery {
    pub status: Option<ProfileStatus>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

impl AdminListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: ProfileStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_clamped() {
        let p = Pagination { limit: 0, offset: -5 };
        assert_eq!(p.bounds(), (1, 0));
        let p = Pagination { limit: 10_000, offset: 40 };
        assert_eq!(p.bounds(), (MAX_LIMIT, 40));
    }
}
