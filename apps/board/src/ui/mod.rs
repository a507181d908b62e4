//! Page model: activity cards, signup form, and status region, rendered
//! through the askama templates under `templates/`.

pub mod cards;
pub mod page;
pub mod status;

pub use cards::ActivityCard;
pub use page::{
    ActivitiesList, DeleteControl, FormError, PageContext, SignupForm, SignupSubmission,
};
pub use status::{StatusKind, StatusRegion};
