pub mod page;
pub mod request;

pub use page::{FetchResult, SearchAndFetchResult};
pub use request::{FetchBudget, RunMessage, RunRequest, SearchRequest, DEFAULT_MAX_CHARS_PER_PAGE};
