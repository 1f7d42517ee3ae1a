pub mod pose_feed;
pub mod relay;
