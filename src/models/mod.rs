pub mod apply_child;
pub mod holiday;
pub mod org;
pub mod override_setting;
pub mod owner;
pub mod view;

pub use apply_child::ApplyChildType;
pub use holiday::{HolidayDraft, HolidayRecord};
pub use org::{Franchise, HeadOffice, Store};
pub use override_setting::{HolidaySourceType, ParentHolidayOperatingSetting};
pub use owner::{LEGAL_OWNER_ID, OwnerRef, OwnerType};
pub use view::{HolidayView, ResolvedCalendar};
