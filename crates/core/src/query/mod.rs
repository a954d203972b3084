// Query Layer - Filters, criteria and paging

pub mod criteria;
pub mod filter;
pub mod page;

pub use criteria::{AlunoCriteria, Criteria, MetaCriteria};
pub use filter::{
    AreaFilter, Filter, IntegerFilter, LocalDateFilter, LongFilter, Predicate, RangeFilter,
    StringFilter,
};
pub use page::{Direction, Page, PageRequest, SortOrder, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
