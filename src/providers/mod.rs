pub mod exchangerate_api;
pub mod util;
