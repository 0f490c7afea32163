use serde::Serialize;

use crate::domain::errors::ValidationError;

/// Largest page a caller may request
pub const MAX_PAGE_SIZE: u32 = 100;

/// A validated, 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    index: u32,
    size: u32,
}

impl PageRequest {
    pub fn new(index: u32, size: u32) -> Result<Self, ValidationError> {
        if index == 0 {
            return Err(ValidationError::InvalidPageIndex(index.to_string()));
        }
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(ValidationError::InvalidPageSize {
                value: size.to_string(),
                max: MAX_PAGE_SIZE,
            });
        }
        Ok(Self { index, size })
    }

    /// Parse the string arguments an outer layer receives
    pub fn parse(index: &str, size: &str) -> Result<Self, ValidationError> {
        let parsed_index = index
            .trim()
            .parse::<u32>()
            .map_err(|_| ValidationError::InvalidPageIndex(index.to_string()))?;
        let parsed_size = size
            .trim()
            .parse::<u32>()
            .map_err(|_| ValidationError::InvalidPageSize {
                value: size.to_string(),
                max: MAX_PAGE_SIZE,
            })?;
        Self::new(parsed_index, parsed_size)
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.index - 1) * u64::from(self.size)
    }
}

/// One page of results plus the total row count of the query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub total: u64,
    pub page_index: u32,
    pub page_size: u32,
    pub data: Vec<T>,
}

impl<T> Page<T> {
    pub fn empty(request: PageRequest, total: u64) -> Self {
        Self {
            total,
            page_index: request.index(),
            page_size: request.size(),
            data: Vec::new(),
        }
    }

    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Page<U>, E> {
        let data = self.data.into_iter().map(f).collect::<Result<Vec<_>, E>>()?;
        Ok(Page {
            total: self.total,
            page_index: self.page_index,
            page_size: self.page_size,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_bounds() {
        assert!(PageRequest::new(1, 1).is_ok());
        assert!(PageRequest::new(0, 10).is_err());
        assert!(PageRequest::new(1, 0).is_err());
        assert!(PageRequest::new(1, MAX_PAGE_SIZE + 1).is_err());
    }

    #[test]
    fn test_page_request_parse() {
        let page = PageRequest::parse("3", " 20").unwrap();
        assert_eq!(page.offset(), 40);
        assert!(matches!(
            PageRequest::parse("x", "10"),
            Err(ValidationError::InvalidPageIndex(_))
        ));
        assert!(matches!(
            PageRequest::parse("1", "-5"),
            Err(ValidationError::InvalidPageSize { .. })
        ));
    }

    #[test]
    fn test_page_serializes_camel_case() {
        let page: Page<u8> = Page::empty(PageRequest::new(2, 5).unwrap(), 7);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["pageIndex"], 2);
        assert_eq!(json["pageSize"], 5);
        assert_eq!(json["total"], 7);
        assert!(json["data"].as_array().unwrap().is_empty());
    }
}
