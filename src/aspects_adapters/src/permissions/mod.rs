pub mod deny_all_permission;
pub mod static_course_staff_permission;

pub use deny_all_permission::DenyAllPermission;
pub use static_course_staff_permission::StaticCourseStaffPermission;
