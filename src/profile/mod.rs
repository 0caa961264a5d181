//! 学生资料：路由表、资料类型与更新表单。
//!
//! # Student Profile Domain
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`routes`] | Read candidates and the write route, built-in or from YAML |
//! | [`types`] | [`StudentProfile`], the typed view over a read payload |
//! | [`update`] | [`ProfileUpdate`] and the multipart plan it turns into |
//! | [`mime`] | Photo MIME type by file extension |

pub mod mime;
pub mod routes;
pub mod types;
pub mod update;

pub use mime::photo_mime_type;
pub use routes::{ProfileRoutes, ReadRoutes, WriteRoute};
pub use types::{StudentProfile, PROFILE_FIELDS};
pub use update::{PhotoPart, PhotoSource, ProfileUpdate, UpdatePlan};
