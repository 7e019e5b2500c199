use serde::{Deserialize, Serialize};
use emotion_sense::scoring::FrameSignal;
use emotion_sense::{AnalysisResult, HistoryEntry};

#[derive(Debug, Deserialize)]
pub struct TextAnalysisRequest {
    pub text: Option<String>,
    pub save: Option<bool>,
}

impl TextAnalysisRequest {
    pub fn into_text(self) -> Result<String, String> {
        let text = self.text.unwrap_or_default().trim().to_string();
        if text.is_empty() {
            return Err("text is required".to_string());
        }
        Ok(text)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FaceCaptureRequest {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl FaceCaptureRequest {
    pub fn into_frame(self, default_width: u32, default_height: u32) -> Result<FrameSignal, String> {
        let frame = FrameSignal::new(
            self.width.unwrap_or(default_width),
            self.height.unwrap_or(default_height),
        );
        if !frame.is_ready() {
            return Err("camera not ready".to_string());
        }
        Ok(frame)
    }
}

#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    pub interval_ms: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub result: AnalysisResult,
    pub emoji: String,
    pub entry: Option<HistoryEntry>,
    pub warnings: Vec<String>,
}

impl AnalysisResponse {
    pub fn new(result: AnalysisResult, entry: Option<HistoryEntry>, warnings: Vec<String>) -> Self {
        let emoji = emotion_sense::display::emoji_for(result.primary_emotion.label()).to_string();
        Self {
            result,
            emoji,
            entry,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_request_is_trimmed() {
        let request = TextAnalysisRequest {
            text: Some("  so happy today \n".to_string()),
            save: None,
        };

        assert_eq!(request.into_text().expect("text"), "so happy today");
    }

    #[test]
    fn blank_text_is_rejected() {
        for text in [None, Some(String::new()), Some("   \t".to_string())] {
            let request = TextAnalysisRequest { text, save: Some(true) };
            assert_eq!(request.into_text().unwrap_err(), "text is required");
        }
    }

    #[test]
    fn face_request_falls_back_to_configured_size() {
        let frame = FaceCaptureRequest::default()
            .into_frame(640, 480)
            .expect("frame");

        assert_eq!((frame.width, frame.height), (640, 480));
    }

    #[test]
    fn zero_sized_frame_is_not_ready() {
        let request = FaceCaptureRequest {
            width: Some(0),
            height: Some(480),
        };
        assert_eq!(request.into_frame(640, 480).unwrap_err(), "camera not ready");

        let request = FaceCaptureRequest::default();
        assert_eq!(request.into_frame(0, 0).unwrap_err(), "camera not ready");
    }
}
