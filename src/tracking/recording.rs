use anyhow::{bail, Context, Result};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::rig::Rect;
use crate::skeleton::{JointSnapshot, JointType};
use crate::tracking::{SkeletonFrame, SkeletonSource};

// --- データ構造 ---

/// 記録された1フレーム
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    /// 記録開始からの経過時間（ミリ秒）
    pub time_ms: u64,
    pub slot: usize,
    #[serde(default)]
    pub bounds: Rect,
    /// ジョイント名 → [x, y, z]
    pub joints: BTreeMap<String, [f32; 3]>,
}

impl RecordedFrame {
    pub fn from_frame(time_ms: u64, frame: &SkeletonFrame) -> Self {
        let joints = frame
            .joints
            .iter()
            .map(|(joint, p)| (joint.name().to_string(), [p.x, p.y, p.z]))
            .collect();
        Self {
            time_ms,
            slot: frame.slot,
            bounds: frame.bounds,
            joints,
        }
    }

    /// 未知のジョイント名はエラー。欠損はそのまま（描画時に検出される）
    pub fn to_frame(&self) -> Result<SkeletonFrame> {
        let mut joints = JointSnapshot::empty();
        for (name, p) in &self.joints {
            let Some(joint) = JointType::from_name(name) else {
                bail!("Unknown joint name: {}", name);
            };
            joints.set(joint, Point3::new(p[0], p[1], p[2]));
        }
        Ok(SkeletonFrame {
            slot: self.slot,
            joints,
            bounds: self.bounds,
        })
    }
}

/// 骨格フレームの記録
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub frames: Vec<RecordedFrame>,
}

impl Recording {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read recording {}", path.display()))?;
        let recording: Recording = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse recording {}", path.display()))?;
        Ok(recording)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).context("Failed to write recording file")?;
        Ok(())
    }

    /// 記録の長さ（最後のフレームの時刻）
    pub fn duration(&self) -> Duration {
        let last = self.frames.iter().map(|f| f.time_ms).max().unwrap_or(0);
        Duration::from_millis(last)
    }
}

// --- 再生 ---

/// ジョイントが揃っていない記録フレーム
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncompleteFrame {
    pub offset: Duration,
    pub slot: usize,
    pub missing: Vec<JointType>,
}

/// 記録を実時間で再生するフレーム供給元
pub struct ReplaySource {
    frames: Vec<(Duration, SkeletonFrame)>,
    cursor: usize,
    started: Option<Instant>,
    loop_playback: bool,
}

impl ReplaySource {
    /// 全フレームを先に検証する。時刻順に並べ替える
    pub fn new(recording: &Recording, loop_playback: bool) -> Result<Self> {
        let mut frames = recording
            .frames
            .iter()
            .map(|f| Ok((Duration::from_millis(f.time_ms), f.to_frame()?)))
            .collect::<Result<Vec<_>>>()?;
        frames.sort_by_key(|(offset, _)| *offset);
        Ok(Self {
            frames,
            cursor: 0,
            started: None,
            loop_playback,
        })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// 欠けたジョイントを持つフレーム（再生順）。これらは描画時に `MissingJoint` になる
    pub fn incomplete_frames(&self) -> Vec<IncompleteFrame> {
        self.frames
            .iter()
            .filter(|(_, frame)| !frame.joints.is_complete())
            .map(|(offset, frame)| IncompleteFrame {
                offset: *offset,
                slot: frame.slot,
                missing: frame.joints.missing(),
            })
            .collect()
    }

    /// `now` までに再生時刻を迎えたフレームを返す。初回呼び出しが再生開始
    pub fn poll_frames_at(&mut self, now: Instant) -> Vec<SkeletonFrame> {
        if self.frames.is_empty() {
            return Vec::new();
        }
        if self.loop_playback && self.cursor >= self.frames.len() {
            self.cursor = 0;
            self.started = Some(now);
        }
        let started = *self.started.get_or_insert(now);
        let elapsed = now.saturating_duration_since(started);

        let mut out = Vec::new();
        while let Some((offset, frame)) = self.frames.get(self.cursor) {
            if *offset > elapsed {
                break;
            }
            out.push(frame.clone());
            self.cursor += 1;
        }
        out
    }
}

impl SkeletonSource for ReplaySource {
    fn poll_frames(&mut self) -> Vec<SkeletonFrame> {
        self.poll_frames_at(Instant::now())
    }

    fn is_finished(&self) -> bool {
        !self.loop_playback && self.cursor >= self.frames.len()
    }
}
