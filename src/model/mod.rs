// Survey Record Model - Submission → Household → Members, Submission → WaterPoint
//
// Every record is an owned value. Nothing is shared between submissions, so the
// defect injector can mutate one tree in place without touching another.
//
// A few fields are wider than the clean survey schema needs (nullable consent,
// signed sizes/distances, bool-or-text diarrhoea flag). Those widenings exist
// only so that injected defects have a faithful JSON representation.

pub mod batch;
pub mod household;
pub mod member;
pub mod submission;
pub mod water_point;

pub use batch::{BatchDocument, BatchMeta, BatchProvenance};
pub use household::{Household, PrimaryWaterSource, WaterFilterType};
pub use member::{FlagValue, Member, Sex};
pub use submission::{Submission, SubmissionStatus};
pub use water_point::{WaterPoint, WaterSourceType};
