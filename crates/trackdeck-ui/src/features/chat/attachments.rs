//! Attachment presentation.

use trackdeck_bridge_models::{Attachment, AttachmentKind};

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Human-readable size with one decimal above bytes.
#[must_use]
pub fn format_file_size(size: Option<u64>) -> String {
    let Some(bytes) = size else {
        return "Unknown size".to_string();
    };
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    #[allow(clippy::cast_precision_loss)]
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

/// How an attachment is laid out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttachmentView {
    /// Inline image.
    Image {
        /// Image source.
        url: String,
        /// Alt text.
        alt: String,
    },
    /// File row with name and size.
    File {
        /// Download location.
        url: String,
        /// File name.
        filename: String,
        /// Humanized size.
        size: String,
    },
}

impl From<&Attachment> for AttachmentView {
    fn from(attachment: &Attachment) -> Self {
        match attachment.kind {
            AttachmentKind::Image => Self::Image {
                url: attachment.url.clone(),
                alt: attachment.filename.clone(),
            },
            _ => Self::File {
                url: attachment.url.clone(),
                filename: attachment.filename.clone(),
                size: format_file_size(attachment.size),
            },
        }
    }
}
