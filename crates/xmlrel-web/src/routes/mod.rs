mod files;
mod health;
mod tags;

pub use files::file_routes;
pub use health::health_routes;
pub use tags::tag_routes;
