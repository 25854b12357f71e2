pub mod video;

pub use video::{UploadVideoResponse, VideoLinkResponse};
