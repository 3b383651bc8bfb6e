use anyhow::{bail, Result};
use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use shape_rig::config::Config;
use shape_rig::log;
use shape_rig::logging::open_log_file;
use shape_rig::rig::Bone;
use shape_rig::scene::Scene;
use shape_rig::tracking::{PlayerRoster, Recording, ReplaySource, RosterEvent, SkeletonSource};

const CONFIG_PATH: &str = "config.toml";

fn main() -> Result<()> {
    let config = Config::load_or_default(CONFIG_PATH);
    let (logfile, log_path) = open_log_file(&config.log.dir)?;

    // 引数の記録ファイルが config.toml より優先
    let recording_path = match std::env::args().nth(1).or_else(|| config.replay.path.clone()) {
        Some(path) => path,
        None => bail!("Usage: shape_rig <recording.json> (or set [replay] path in {})", CONFIG_PATH),
    };

    log!(logfile, "Shape Rig {}", env!("GIT_VERSION"));
    log!(logfile, "Log: {}", log_path.display());
    log!(logfile, "Recording: {}", recording_path);
    log!(logfile, "Target FPS: {}", config.app.target_fps);
    log!(logfile, "Expiry: {}ms, max players: {}", config.rig.expiry_ms, config.rig.max_players);

    let recording = Recording::load(&recording_path)?;
    log!(logfile, "Frames: {} ({:.1}s)", recording.frames.len(), recording.duration().as_secs_f32());
    let mut source = ReplaySource::new(&recording, config.replay.loop_playback)?;
    let incomplete = source.incomplete_frames();
    if let Some(first) = incomplete.first() {
        let names: Vec<&str> = first.missing.iter().map(|j| j.name()).collect();
        log!(
            logfile,
            "Warning: {} frames lack joints (first: player {} at {}ms, missing {})",
            incomplete.len(),
            first.slot,
            first.offset.as_millis(),
            names.join(", ")
        );
    }

    let scene = Scene::new();
    let mut roster = PlayerRoster::from_config(&config.rig, &scene);
    let frame_interval = config.app.frame_interval();

    let mut failing: BTreeSet<usize> = BTreeSet::new();
    let mut frame_count: u32 = 0;
    let mut report_timer = Instant::now();

    loop {
        let tick = Instant::now();

        for frame in source.poll_frames() {
            match roster.apply_frame(frame, tick) {
                Some(RosterEvent::Joined { slot }) => log!(logfile, "Player {} joined", slot),
                Some(RosterEvent::Rejected { slot }) => {
                    log!(logfile, "Player {} ignored: roster full", slot)
                }
                _ => {}
            }
        }

        // 失敗中のリグは前回の姿勢のまま残り、期限切れで退場する。ログは失敗し始めた時だけ
        let mut failed_now = BTreeSet::new();
        for event in roster.draw_all(tick) {
            match event {
                RosterEvent::Left { slot } => log!(logfile, "Player {} left", slot),
                RosterEvent::Failed { slot, error } => {
                    if !failing.contains(&slot) {
                        log!(logfile, "Player {} draw failed: {}", slot, error);
                    }
                    failed_now.insert(slot);
                }
                _ => {}
            }
        }
        failing = failed_now;
        frame_count += 1;

        if report_timer.elapsed() >= Duration::from_secs(1) {
            let heads: Vec<String> = roster
                .slots()
                .into_iter()
                .filter_map(|slot| roster.get(slot))
                .map(|rig| {
                    let head = rig.segment(Bone::Head).transform();
                    format!(
                        "#{} head=({:.2}, {:.2}, {:.2})",
                        rig.id(),
                        head.center.x,
                        head.center.y,
                        head.center.z
                    )
                })
                .collect();
            log!(
                logfile,
                "FPS: {} | players: {} | segments: {} | {}",
                frame_count,
                roster.len(),
                scene.len(),
                heads.join(" ")
            );
            frame_count = 0;
            report_timer = Instant::now();
        }

        if source.is_finished() && roster.is_empty() {
            log!(logfile, "Playback finished");
            break;
        }

        let elapsed = tick.elapsed();
        if elapsed < frame_interval {
            std::thread::sleep(frame_interval - elapsed);
        }
    }

    Ok(())
}
