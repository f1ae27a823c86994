// Core algorithm exports
pub mod criteria;
pub mod error;
pub mod factors;
pub mod matcher;
pub mod notify;
pub mod repository;
pub mod scoring;
pub mod weights;

pub use criteria::{Bounds, Criteria};
pub use error::MatchError;
pub use matcher::{Matcher, MatcherSettings};
pub use notify::{Notifier, TopMatchNotification};
pub use repository::{
    AdminAllowList, AuthorizationCheck, CandidatePage, CandidateRetriever, NotificationSink,
    PostingRepository, ProfileRepository, RepositoryError,
};
pub use scoring::{calculate_match_score, generate_match_reasons, generate_recommendations, ReasonThresholds};
pub use weights::{WeightManager, WeightState};
