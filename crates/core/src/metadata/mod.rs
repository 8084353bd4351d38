//! Metadata boundary: decoding yt-dlp's JSON dumps into typed video and
//! playlist models.

mod decode;
mod error;
mod types;

pub use decode::{
    output_is_playlist, parse_playlist_preview, parse_playlist_shell, parse_video_documents,
    parse_video_info, split_json_documents,
};
pub use error::MetadataError;
pub use types::{
    PlaylistCore, PlaylistInfo, PlaylistPreviewInfo, VideoCore, VideoInfo, VideoMetadata,
    VideoPreviewInfo,
};
