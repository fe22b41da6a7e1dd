// transcript/types.rs
//
// Transcript data types and timestamp formatting.

use serde::{Deserialize, Serialize};

/// One timed segment of spoken content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Seconds from media start
    pub start: f64,
    /// Seconds from media start
    pub end: f64,
    pub text: String,
}

/// Ordered sequence of timed segments for one video
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    pub fn new(segments: Vec<TranscriptSegment>) -> Self {
        Self { segments }
    }

    /// True when no segment carries any non-whitespace text
    pub fn is_blank(&self) -> bool {
        self.segments.iter().all(|s| s.text.trim().is_empty())
    }

    /// Render the analysis form: one `[MM:SS - MM:SS] text` line per segment
    pub fn render(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            out.push_str(&format!(
                "[{} - {}] {}\n",
                format_timecode(segment.start),
                format_timecode(segment.end),
                segment.text
            ));
        }
        out
    }
}

/// Format seconds from media start as MM:SS (zero-padded, floored)
pub fn format_timecode(seconds: f64) -> String {
    let total_seconds = seconds.max(0.0).floor() as u64;
    let minutes = total_seconds / 60;
    let secs = total_seconds % 60;

    format!("{:02}:{:02}", minutes, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timecode() {
        assert_eq!(format_timecode(0.0), "00:00");
        assert_eq!(format_timecode(7.9), "00:07");
        assert_eq!(format_timecode(65.0), "01:05");
        assert_eq!(format_timecode(600.4), "10:00");
    }

    #[test]
    fn test_format_timecode_negative_clamps() {
        assert_eq!(format_timecode(-3.0), "00:00");
    }

    #[test]
    fn test_render_line_format() {
        let transcript = Transcript::new(vec![
            TranscriptSegment {
                start: 0.0,
                end: 4.2,
                text: "welcome back everyone".to_string(),
            },
            TranscriptSegment {
                start: 4.2,
                end: 9.8,
                text: "today we look at the rules".to_string(),
            },
        ]);

        let rendered = transcript.render();
        assert_eq!(
            rendered,
            "[00:00 - 00:04] welcome back everyone\n[00:04 - 00:09] today we look at the rules\n"
        );
    }

    #[test]
    fn test_is_blank() {
        assert!(Transcript::default().is_blank());
        assert!(Transcript::new(vec![TranscriptSegment {
            start: 0.0,
            end: 1.0,
            text: "   ".to_string(),
        }])
        .is_blank());
        assert!(!Transcript::new(vec![TranscriptSegment {
            start: 0.0,
            end: 1.0,
            text: "hello".to_string(),
        }])
        .is_blank());
    }
}
