pub mod following_aggregator;
pub mod refresh_report;
pub mod refresher;

pub use following_aggregator::{FollowingAggregator, PaginationPolicy, PaginationSummary};
pub use refresh_report::RefreshReport;
pub use refresher::UserInfoRefresher;
