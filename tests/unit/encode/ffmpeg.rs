use super::*;

fn cfg(width: u32, height: u32, fps: Fps) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps,
        frame_count: 2,
        audio: None,
    }
}

fn gray_frame(side: u32) -> Frame {
    Frame {
        width: side,
        height: side,
        data: vec![128; (side * side * 4) as usize],
    }
}

#[test]
fn begin_validates_config_before_spawning() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.mp4");
    let fps = Fps::new(30, 1).unwrap();

    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&out));
    assert!(sink.begin(cfg(0, 16, fps)).is_err());
    assert!(sink.begin(cfg(15, 16, fps)).is_err());
    assert!(sink.begin(cfg(16, 16, Fps { num: 0, den: 1 })).is_err());
    assert!(!out.exists());
}

#[test]
fn begin_refuses_to_overwrite_when_asked() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("taken.mp4");
    std::fs::write(&out, b"keep me").unwrap();

    let mut opts = FfmpegSinkOpts::new(&out);
    opts.overwrite = false;
    let mut sink = FfmpegSink::new(opts);
    let err = sink.begin(cfg(16, 16, Fps::new(30, 1).unwrap())).unwrap_err();
    assert!(err.to_string().contains("already exists"));
    assert_eq!(std::fs::read(&out).unwrap(), b"keep me");
}

#[test]
fn push_and_end_before_begin_fail() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("unused.mp4"));
    assert!(sink.push_frame(FrameIndex(0), &gray_frame(16)).is_err());
    assert!(sink.end().is_err());
}

#[test]
fn partial_path_is_a_hidden_sibling() {
    let p = partial_path_for(Path::new("renders/final.mp4")).unwrap();
    assert_eq!(p.parent(), Some(Path::new("renders")));
    let name = p.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with(".final.mp4."));
    assert!(name.ends_with(".partial"));

    assert!(partial_path_for(Path::new("/")).is_err());
}

#[test]
fn encodes_frames_and_leaves_only_the_final_file() {
    if !is_ffmpeg_on_path() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("clip.mp4");

    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&out));
    sink.begin(cfg(16, 16, Fps::new(10, 1).unwrap())).unwrap();
    sink.push_frame(FrameIndex(0), &gray_frame(16)).unwrap();
    assert!(sink.push_frame(FrameIndex(0), &gray_frame(16)).is_err());
    sink.push_frame(FrameIndex(1), &gray_frame(16)).unwrap();
    sink.end().unwrap();

    assert!(out.exists());
    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("clip.mp4")]);
}

#[test]
fn dropping_an_unfinished_sink_leaves_nothing_behind() {
    if !is_ffmpeg_on_path() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("aborted.mp4");
    {
        let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&out));
        sink.begin(cfg(16, 16, Fps::new(10, 1).unwrap())).unwrap();
        sink.push_frame(FrameIndex(0), &gray_frame(16)).unwrap();
    }
    assert!(!out.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
