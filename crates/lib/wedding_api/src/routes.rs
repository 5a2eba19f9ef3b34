//! Route path constants.
//!
//! Paths are relative to [`API_PREFIX`]; `router()` nests them under it.

pub const API_PREFIX: &str = "/api/v1";

pub const GET_HEALTH_STATUS: &str = "/health/status";

pub const POST_USER_REGISTER: &str = "/user/register";
pub const POST_USER_LOGIN: &str = "/user/login";
pub const GET_USER_PROFILE: &str = "/user/profile";
pub const PATCH_USER_UPDATE: &str = "/user/update";
pub const DELETE_USER_DELETE: &str = "/user/delete";
pub const POST_USER_LOGOUT: &str = "/user/logout";

pub const WEDDINGS: &str = "/weddings";
pub const WEDDINGS_ID: &str = "/weddings/{id}";
pub const GET_WEDDINGS_ID_COUNTDOWN: &str = "/weddings/{id}/countdown";
