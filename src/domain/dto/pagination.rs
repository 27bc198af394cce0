use serde::Deserialize;

const DEFAULT_LIMIT: u64 = 10;
const MAX_LIMIT: u64 = 100;
/// MongoDB는 skip을 i64로 받음
const MAX_SKIP: u64 = i64::MAX as u64;

/// `?page=&limit=` 쿼리 (page는 1부터)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// 저장소 조회용 skip/limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub skip: u64,
    pub limit: u64,
}

impl PageRequest {
    /// 범위를 벗어난 값은 보정합니다 (page >= 1, 1 <= limit <= 100)
    pub fn new(page: Option<u64>, limit: Option<u64>) -> Self {
        let page = page.unwrap_or(1).max(1);
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

        Self {
            skip: (page - 1).saturating_mul(limit).min(MAX_SKIP),
            limit,
        }
    }
}

impl From<&PageQuery> for PageRequest {
    fn from(query: &PageQuery) -> Self {
        PageRequest::new(query.page, query.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_first_page_of_ten() {
        assert_eq!(PageRequest::new(None, None), PageRequest { skip: 0, limit: 10 });
    }

    #[test]
    fn test_clamps_out_of_range_values() {
        assert_eq!(PageRequest::new(Some(0), Some(0)), PageRequest { skip: 0, limit: 1 });
        assert_eq!(PageRequest::new(Some(3), Some(500)), PageRequest { skip: 200, limit: 100 });
    }

    #[test]
    fn test_huge_page_saturates_instead_of_overflowing() {
        let page = PageRequest::new(Some(u64::MAX), Some(100));
        assert_eq!(page.limit, 100);
        assert_eq!(page.skip, i64::MAX as u64);
    }
}
