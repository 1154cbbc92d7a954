mod region;
mod resume;
mod status;

pub(crate) use region::{region_tooltip_label, user_region_eligible};
pub(crate) use resume::{matching_resume_rule, resume_step_or, DEFAULT_RESUME_STEP};
pub(crate) use status::{listing_status, ListingStatus};
