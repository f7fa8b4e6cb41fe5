pub mod bbox;
pub mod point;
pub mod point_set;
pub mod tags;

pub use bbox::BoundingBox;
pub use point::{haversine_m, Point, EARTH_RADIUS_M, POI_TAG};
pub use point_set::PointSet;
pub use tags::{count_tags, TagCount, MISSING_TAG_KEY};
