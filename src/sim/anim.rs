//! Tick-driven sprite animation
//!
//! A clip is a row of frames advanced every `ticks_per_frame` ticks. Looping
//! clips wrap; one-shot clips hold on their last frame.

use serde::{Deserialize, Serialize};

/// Frame count and cadence for one animation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimClip {
    pub frames: u32,
    pub ticks_per_frame: u32,
    pub looping: bool,
}

impl AnimClip {
    pub const fn looping(frames: u32, ticks_per_frame: u32) -> Self {
        Self {
            frames,
            ticks_per_frame,
            looping: true,
        }
    }

    pub const fn once(frames: u32, ticks_per_frame: u32) -> Self {
        Self {
            frames,
            ticks_per_frame,
            looping: false,
        }
    }

    #[inline]
    pub fn last_frame(&self) -> u32 {
        self.frames.saturating_sub(1)
    }

    /// Ticks needed to show every frame once
    #[inline]
    pub fn duration_ticks(&self) -> u32 {
        self.frames * self.ticks_per_frame
    }

    /// Same clip with the frame count read from a one-row sheet
    pub fn with_sheet(self, width: u32, height: u32) -> Self {
        Self {
            frames: columns_from_sheet(width, height, self.frames),
            ..self
        }
    }
}

/// Count frames in a one-row sprite sheet
///
/// Square frames divide the width exactly; anything else uses `fallback`.
pub fn columns_from_sheet(width: u32, height: u32, fallback: u32) -> u32 {
    if height > 0 && width > 0 && width % height == 0 {
        return width / height;
    }
    log::warn!(
        "Sheet {}x{} has no whole number of square frames, using {} columns",
        width,
        height,
        fallback
    );
    fallback.max(1)
}

/// Playback position within a clip
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animator {
    pub frame: u32,
    pub delay: u32,
}

impl Animator {
    /// Restart from the first frame
    pub fn reset(&mut self) {
        self.frame = 0;
        self.delay = 0;
    }

    /// Advance one tick through `clip`
    pub fn advance(&mut self, clip: &AnimClip) {
        self.delay += 1;
        if self.delay < clip.ticks_per_frame {
            return;
        }
        self.delay = 0;
        if clip.looping {
            self.frame = (self.frame + 1) % clip.frames.max(1);
        } else if self.frame < clip.last_frame() {
            self.frame += 1;
        }
    }

    /// A one-shot clip has reached its final frame
    pub fn is_finished(&self, clip: &AnimClip) -> bool {
        !clip.looping && self.frame >= clip.last_frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looping_clip_wraps() {
        let clip = AnimClip::looping(3, 2);
        let mut anim = Animator::default();
        let frames: Vec<u32> = (0..8)
            .map(|_| {
                anim.advance(&clip);
                anim.frame
            })
            .collect();
        assert_eq!(frames, vec![0, 1, 1, 2, 2, 0, 0, 1]);
    }

    #[test]
    fn test_one_shot_clip_holds_last_frame() {
        let clip = AnimClip::once(2, 6);
        let mut anim = Animator::default();
        for _ in 0..5 {
            anim.advance(&clip);
        }
        assert!(!anim.is_finished(&clip));
        anim.advance(&clip);
        assert_eq!(anim.frame, 1);
        assert!(anim.is_finished(&clip));
        for _ in 0..50 {
            anim.advance(&clip);
        }
        assert_eq!(anim.frame, 1);
    }

    #[test]
    fn test_looping_clip_never_finishes() {
        let clip = AnimClip::looping(1, 1);
        let anim = Animator::default();
        assert!(!anim.is_finished(&clip));
    }

    #[test]
    fn test_columns_from_sheet() {
        assert_eq!(columns_from_sheet(96, 32, 2), 3);
        assert_eq!(columns_from_sheet(100, 32, 2), 2);
        assert_eq!(columns_from_sheet(100, 0, 0), 1);
    }
}
