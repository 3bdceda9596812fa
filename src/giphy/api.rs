//! Giphy API response types (internal) and their mapping onto public records.

use log::warn;
use serde::Deserialize;
use serde_json::Value;

use crate::error::GiphyError;
use crate::models::{GifData, GifImage, Pagination};

#[derive(Deserialize, Debug, Default)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(default)]
    pub pagination: Option<RawPagination>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Meta {
    pub status: Option<u16>,
    pub msg: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct RawPagination {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub offset: u64,
}

#[derive(Deserialize, Debug)]
pub struct RawGif {
    pub id: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub rating: Option<String>,
    pub import_datetime: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub images: RawImages,
}

#[derive(Deserialize, Debug, Default)]
pub struct RawImages {
    pub original: Option<RawImage>,
    pub fixed_height_small: Option<RawImage>,
    pub fixed_height_small_still: Option<RawImage>,
}

#[derive(Deserialize, Debug, Default)]
pub struct RawImage {
    pub url: Option<String>,
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub size: Option<Dimension>,
}

/// Giphy sends numeric image fields as strings; accept plain numbers too.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Dimension {
    Number(u64),
    Text(String),
}

impl Dimension {
    fn parse(field: &str, value: Option<&Dimension>) -> Result<u64, String> {
        match value {
            None => Ok(0),
            Some(Dimension::Number(n)) => Ok(*n),
            Some(Dimension::Text(s)) => s
                .trim()
                .parse::<u64>()
                .map_err(|_| format!("invalid {} {:?}", field, s)),
        }
    }
}

impl SearchResponse {
    /// Fails when the envelope's `meta.status` is anything but 200.
    pub fn check_meta(&self) -> Result<(), GiphyError> {
        let meta = self.meta.as_ref();
        if meta.and_then(|m| m.status) == Some(200) {
            return Ok(());
        }
        let msg = meta
            .and_then(|m| m.msg.clone())
            .unwrap_or_else(|| "Unknown error".to_string());
        Err(GiphyError::Api(msg))
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
            .as_ref()
            .map(|p| Pagination {
                total: p.total_count,
                count: p.count,
                offset: p.offset,
            })
            .unwrap_or_default()
    }

    /// Maps every well-formed entry; malformed ones are logged and dropped.
    pub fn into_gifs(self) -> Vec<GifData> {
        self.data
            .into_iter()
            .filter_map(|value| {
                let parsed = serde_json::from_value::<RawGif>(value)
                    .map_err(|e| e.to_string())
                    .and_then(GifData::try_from);
                match parsed {
                    Ok(gif) => Some(gif),
                    Err(e) => {
                        warn!("Error parsing GIF data: {}", e);
                        None
                    }
                }
            })
            .collect()
    }
}

fn image(raw: Option<&RawImage>) -> Result<GifImage, String> {
    let Some(raw) = raw else {
        return Ok(GifImage::default());
    };
    let dim = |field: &str, value: Option<&Dimension>| -> Result<u32, String> {
        let n = Dimension::parse(field, value)?;
        u32::try_from(n).map_err(|_| format!("{} {} out of range", field, n))
    };
    Ok(GifImage {
        url: raw.url.clone().unwrap_or_default(),
        width: dim("width", raw.width.as_ref())?,
        height: dim("height", raw.height.as_ref())?,
        size: Dimension::parse("size", raw.size.as_ref())?,
    })
}

impl TryFrom<RawGif> for GifData {
    type Error = String;

    fn try_from(raw: RawGif) -> Result<Self, Self::Error> {
        Ok(GifData {
            original: image(raw.images.original.as_ref())?,
            preview: image(raw.images.fixed_height_small.as_ref())?,
            thumbnail: image(raw.images.fixed_height_small_still.as_ref())?,
            id: raw.id.unwrap_or_default(),
            title: raw.title.unwrap_or_default(),
            url: raw.url.unwrap_or_default(),
            rating: raw.rating.unwrap_or_default(),
            created_at: raw.import_datetime.unwrap_or_default(),
            tags: raw.tags,
        })
    }
}
