//! Image location scheme of the evaluation bucket.
//!
//! Frames live at `{bucket}{block}/{test}/{scene}/scene/scene_{step}.png`.
//! The bucket is used verbatim: no separator is inserted after it, nothing is
//! percent-encoded and the step is not zero-padded.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Compose the image URL for one scene at one step.
pub fn scene_image_url(bucket: &str, block: &str, test: &str, scene: usize, step: u32) -> String {
    format!("{bucket}{block}/{test}/{scene}/scene/scene_{step}.png")
}

/// Derived reference to one frame in the bucket. Never stored, always
/// recomputed from the records and the current step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SceneImageRef {
    pub bucket: String,
    pub block: String,
    pub test: String,
    /// 1-based position of the record in its evaluation set.
    pub scene: usize,
    pub step: u32,
}

impl SceneImageRef {
    /// Same frame location at a different step.
    pub fn with_step(&self, step: u32) -> Self {
        Self {
            step,
            ..self.clone()
        }
    }

    pub fn url(&self) -> String {
        scene_image_url(&self.bucket, &self.block, &self.test, self.scene, self.step)
    }
}

impl fmt::Display for SceneImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url())
    }
}

/// Frame location relative to a bucket root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLocation {
    pub block: String,
    pub test: String,
    pub scene: usize,
    pub step: u32,
}

/// Recognise `{block}/{test}/{scene}/scene/scene_{step}.png`.
///
/// Accepts `/` or `\` as separator so that paths produced on Windows match.
pub fn parse_frame_path(relative: &str) -> Option<FrameLocation> {
    let parts: Vec<&str> = relative.split(['/', '\\']).collect();
    let [block, test, scene, dir, file] = parts.as_slice() else {
        return None;
    };
    if block.is_empty() || test.is_empty() || *dir != "scene" {
        return None;
    }
    let scene = parse_digits(scene)?.try_into().ok()?;
    let step = file
        .strip_prefix("scene_")?
        .strip_suffix(".png")
        .and_then(parse_digits)?
        .try_into()
        .ok()?;
    Some(FrameLocation {
        block: block.to_string(),
        test: test.to_string(),
        scene,
        step,
    })
}

// Plain ASCII digits only; rejects signs and whitespace that `parse` would
// otherwise accept or that would not round-trip through the URL scheme.
fn parse_digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn url_matches_bucket_layout() {
        assert_eq!(
            scene_image_url("https://x/", "block1", "t1", 1, 3),
            "https://x/block1/t1/1/scene/scene_3.png"
        );
    }

    #[rstest]
    #[case("s3://bucket/eval/", "b", "t", 12, 0, "s3://bucket/eval/b/t/12/scene/scene_0.png")]
    #[case("", "b", "t", 1, 7, "b/t/1/scene/scene_7.png")]
    #[case("prefix-", "b 1", "t%", 2, 105, "prefix-b 1/t%/2/scene/scene_105.png")]
    fn url_is_plain_concatenation(
        #[case] bucket: &str,
        #[case] block: &str,
        #[case] test: &str,
        #[case] scene: usize,
        #[case] step: u32,
        #[case] expected: &str,
    ) {
        assert_eq!(scene_image_url(bucket, block, test, scene, step), expected);
    }

    #[test]
    fn with_step_changes_only_trailing_segment() {
        let frame = SceneImageRef {
            bucket: "https://x/".into(),
            block: "block1".into(),
            test: "t1".into(),
            scene: 2,
            step: 3,
        };
        let later = frame.with_step(14);
        assert_eq!(later.to_string(), "https://x/block1/t1/2/scene/scene_14.png");
        let (a, b) = (frame.url(), later.url());
        assert_eq!(
            a.trim_end_matches("scene_3.png"),
            b.trim_end_matches("scene_14.png")
        );
    }

    #[test]
    fn frame_paths_are_recognised() {
        assert_eq!(
            parse_frame_path("block1/t1/3/scene/scene_12.png"),
            Some(FrameLocation {
                block: "block1".into(),
                test: "t1".into(),
                scene: 3,
                step: 12,
            })
        );
        assert!(parse_frame_path("block1\\t1\\3\\scene\\scene_0.png").is_some());
    }

    #[rstest]
    #[case("block1/t1/3/scene/scene_12.jpg")]
    #[case("block1/t1/3/depth/scene_12.png")]
    #[case("block1/t1/x/scene/scene_12.png")]
    #[case("block1/t1/3/scene/scene_+2.png")]
    #[case("block1/t1/3/scene/scene_.png")]
    #[case("t1/3/scene/scene_12.png")]
    #[case("extra/block1/t1/3/scene/scene_12.png")]
    fn unrelated_paths_are_ignored(#[case] path: &str) {
        assert_eq!(parse_frame_path(path), None);
    }
}
