// Pagination and sorting

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("asc") {
            Some(Direction::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Some(Direction::Desc)
        } else {
            None
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// Ordering on one JSON property name (`dataNascimento`, `valor`, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    pub property: String,
    pub direction: Direction,
}

/// Requested page window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Vec<SortOrder>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: Vec::new(),
        }
    }
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.clamp(1, MAX_PAGE_SIZE),
            sort: Vec::new(),
        }
    }

    pub fn with_sort(mut self, property: impl Into<String>, direction: Direction) -> Self {
        self.sort.push(SortOrder {
            property: property.into(),
            direction,
        });
        self
    }

    /// Read `page`, `size` and repeated `sort` parameters.
    ///
    /// Unparsable or negative numbers fall back to the defaults and `size` is
    /// capped at [`MAX_PAGE_SIZE`]. A `sort` value is a comma list of
    /// properties optionally ending in `asc` or `desc`, which applies to every
    /// property in that value.
    pub fn from_query_pairs(pairs: &[(String, String)]) -> Self {
        let mut request = PageRequest::default();
        for (key, value) in pairs {
            match key.as_str() {
                "page" => {
                    if let Ok(page) = value.trim().parse::<u32>() {
                        request.page = page;
                    }
                }
                "size" => {
                    if let Ok(size) = value.trim().parse::<u32>() {
                        if size > 0 {
                            request.size = size.min(MAX_PAGE_SIZE);
                        }
                    }
                }
                "sort" => request.sort.extend(parse_sort(value)),
                _ => {}
            }
        }
        request
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

fn parse_sort(value: &str) -> Vec<SortOrder> {
    let mut parts: Vec<&str> = value
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let direction = match parts.last().and_then(|last| Direction::parse(last)) {
        Some(direction) => {
            parts.pop();
            direction
        }
        None => Direction::Asc,
    };

    parts
        .into_iter()
        .map(|property| SortOrder {
            property: property.to_string(),
            direction,
        })
        .collect()
}

/// One page of results plus the total match count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub page: u32,
    pub size: u32,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, total_elements: u64, request: &PageRequest) -> Self {
        Self {
            content,
            total_elements,
            page: request.page,
            size: request.size,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 1;
        }
        self.total_elements.div_ceil(u64::from(self.size))
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) + 1 < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn is_last(&self) -> bool {
        !self.has_next()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            page: self.page,
            size: self.size,
        }
    }
}
