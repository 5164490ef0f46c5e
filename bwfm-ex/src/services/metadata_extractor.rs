//! BWF metadata extraction service
//!
//! Reads one file, splits its WAV chunks, decodes the iXML payload and
//! probes the duration concurrently, then normalizes and merges the sources
//! into a single [`BwfMetadata`] record.
//!
//! Extraction fails as a unit: a broken container, a broken iXML document or
//! a failed read returns an error and never a partial record.

use super::duration_probe::{DurationProbe, SymphoniaProbe};
use super::file_handle::{FileBytes, FileHandle};
use super::metadata_merger::merge;
use crate::error::{ExtractionError, ExtractionResult};
use crate::ixml::{parse_document, XmlElement};
use crate::models::{BwfMetadata, FileInfo, RawChunkSet};
use crate::normalizers::{normalize_bext, normalize_file, normalize_fmt, normalize_ixml};
use crate::wav::WavChunks;
use bwfm_common::config::ExtractionConfig;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, info_span, warn, Instrument};

/// Metadata extractor service
#[derive(Clone)]
pub struct MetadataExtractor {
    duration_probe: Option<Arc<dyn DurationProbe>>,
}

impl Default for MetadataExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataExtractor {
    /// Extractor that probes duration with symphonia
    pub fn new() -> Self {
        Self::with_duration_probe(Arc::new(SymphoniaProbe))
    }

    /// Extractor that leaves `duration` absent
    pub fn without_duration_probe() -> Self {
        Self {
            duration_probe: None,
        }
    }

    pub fn with_duration_probe(probe: Arc<dyn DurationProbe>) -> Self {
        Self {
            duration_probe: Some(probe),
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        if config.probe_duration {
            Self::new()
        } else {
            Self::without_duration_probe()
        }
    }

    /// Extract the merged metadata record for one file
    pub async fn extract(&self, file: &dyn FileHandle) -> ExtractionResult<BwfMetadata> {
        let span = info_span!("extract", file = %file.name());
        async move {
            let bytes = file.read_bytes().await?;
            let chunks = WavChunks::parse(&bytes)?;

            let ixml_text = chunks.ixml.filter(|text| !text.is_empty());
            let (ixml, duration) = tokio::join!(
                parse_ixml(ixml_text),
                self.probe_duration(bytes.clone())
            );

            let raw = RawChunkSet {
                fmt: chunks.fmt,
                bext: chunks.bext,
                ixml: ixml?,
                file: FileInfo::from_handle(file),
            };

            let mut metadata = normalize_and_merge(&raw);
            metadata.duration = duration.filter(|seconds| seconds.is_finite() && *seconds >= 0.0);

            info!(
                scene = metadata.scene.as_deref().unwrap_or(""),
                take = metadata.take.as_deref().unwrap_or(""),
                timecode = metadata.timecode.as_deref().unwrap_or(""),
                "Extracted metadata"
            );
            Ok::<_, ExtractionError>(metadata)
        }
        .instrument(span)
        .await
    }

    /// [`MetadataExtractor::extract`], abandoned as soon as `cancel` fires
    pub async fn extract_with_cancellation(
        &self,
        file: &dyn FileHandle,
        cancel: &CancellationToken,
    ) -> ExtractionResult<BwfMetadata> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!(file = %file.name(), "Extraction cancelled");
                Err(ExtractionError::Cancelled)
            }
            result = self.extract(file) => result,
        }
    }

    async fn probe_duration(&self, bytes: FileBytes) -> Option<f64> {
        let probe = Arc::clone(self.duration_probe.as_ref()?);
        match tokio::task::spawn_blocking(move || probe.probe(bytes)).await {
            Ok(duration) => duration,
            Err(e) => {
                warn!(error = %e, "Duration probe task failed");
                None
            }
        }
    }
}

/// Decode the iXML payload off the async runtime; no payload is an empty document
async fn parse_ixml(text: Option<String>) -> ExtractionResult<XmlElement> {
    let Some(text) = text else {
        return Ok(XmlElement::new());
    };
    tokio::task::spawn_blocking(move || parse_document(&text))
        .await
        .map_err(|e| ExtractionError::Internal(format!("iXML parse task failed: {}", e)))?
}

/// Run every normalizer over `raw` and merge the results
pub fn normalize_and_merge(raw: &RawChunkSet) -> BwfMetadata {
    merge(
        normalize_fmt(raw.fmt.as_ref()),
        normalize_bext(raw.bext.as_ref()),
        normalize_ixml(&raw.ixml),
        normalize_file(&raw.file),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::file_handle::InMemoryFile;
    use crate::wav::{BextChunk, FmtChunk};
    use async_trait::async_trait;
    use std::io;

    struct FailingFile;

    #[async_trait]
    impl FileHandle for FailingFile {
        fn name(&self) -> &str {
            "broken.wav"
        }

        fn size_bytes(&self) -> u64 {
            1024
        }

        async fn read_bytes(&self) -> io::Result<FileBytes> {
            Err(io::Error::new(io::ErrorKind::Interrupted, "read aborted"))
        }
    }

    struct StalledFile;

    #[async_trait]
    impl FileHandle for StalledFile {
        fn name(&self) -> &str {
            "stalled.wav"
        }

        fn size_bytes(&self) -> u64 {
            1024
        }

        async fn read_bytes(&self) -> io::Result<FileBytes> {
            std::future::pending().await
        }
    }

    #[test]
    fn test_normalize_and_merge() {
        let raw = RawChunkSet {
            fmt: Some(FmtChunk {
                format_tag: 1,
                num_channels: 2,
                sample_rate: 48000,
                byte_rate: 288000,
                block_align: 6,
                bits_per_sample: 24,
            }),
            bext: Some(BextChunk {
                origination_date: "2024-05-01".to_string(),
                ..Default::default()
            }),
            ixml: XmlElement::new().with_text("SCENE", "12A"),
            file: FileInfo::new("a.wav", 1_000_000),
        };

        let metadata = normalize_and_merge(&raw);
        assert_eq!(metadata.channel_num, Some(2));
        assert_eq!(metadata.scene.as_deref(), Some("12A"));
        assert_eq!(metadata.date_created.as_deref(), Some("2024-05-01"));
        assert_eq!(metadata.filename.as_deref(), Some("a.wav"));
        assert_eq!(metadata.tracks.map(|t| t.len()), Some(2));
    }

    #[tokio::test]
    async fn test_read_failure() {
        let result = MetadataExtractor::without_duration_probe()
            .extract(&FailingFile)
            .await;
        assert!(matches!(result, Err(ExtractionError::Read(_))));
    }

    #[tokio::test]
    async fn test_not_a_container() {
        let file = InMemoryFile::new("a.wav", b"this is not a wave file".to_vec());
        let result = MetadataExtractor::without_duration_probe().extract(&file).await;
        assert!(matches!(result, Err(ExtractionError::MalformedContainer(_))));
    }

    #[tokio::test]
    async fn test_cancellation() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = MetadataExtractor::new()
            .extract_with_cancellation(&StalledFile, &cancel)
            .await;
        assert!(matches!(result, Err(ExtractionError::Cancelled)));
    }

    #[test]
    fn test_from_config() {
        let extractor = MetadataExtractor::from_config(&ExtractionConfig {
            probe_duration: false,
        });
        assert!(extractor.duration_probe.is_none());
        assert!(MetadataExtractor::from_config(&ExtractionConfig::default())
            .duration_probe
            .is_some());
    }
}
