// File-level tests for TagManager.
//
// Each test works in its own temporary directory; nothing outside it is
// touched.

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use id3_core::config::CodecConfig;
    use id3_core::framing::{encode_text_frame, FrameId};
    use id3_core::headers::encode_header_for_body;
    use id3_core::manager::TagManager;
    use id3_core::tag::decode_tag;
    use id3_core::framing::FlagPolicy;
    use id3_core::types::{ErrorKind, TagError, UnsupportedFeature};
    use tempfile::{tempdir, TempDir};

    const PAYLOAD: [u8; 3] = [0xAA, 0xBB, 0xCC];

    fn write(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, bytes).unwrap();
        path
    }

    fn tagged(frames: &[(&str, &str)], padding: usize, payload: &[u8]) -> Vec<u8> {
        let mut body: Vec<u8> = frames
            .iter()
            .flat_map(|(i, v)| encode_text_frame(i, v).unwrap())
            .collect();
        body.resize(body.len() + padding, 0);
        let mut out = encode_header_for_body(body.len()).unwrap().to_vec();
        out.extend_from_slice(&body);
        out.extend_from_slice(payload);
        out
    }

    fn frames_of(path: &Path) -> Vec<(String, String)> {
        let bytes = fs::read(path).unwrap();
        let (_, tag) = decode_tag(&bytes, FlagPolicy::Strict).unwrap();
        tag.iter().map(|(i, v)| (i.to_string(), v.to_owned())).collect()
    }

// # 📖 1. Reading

    #[test]
    fn reads_oversized_frame_with_padding() {
        let dir = tempdir().unwrap();
        #[rustfmt::skip]
        let bytes = [
            b'I', b'D', b'3', 4, 0, 0, 0, 0, 0, 20,
            b'T', b'I', b'T', b'2', 0, 0, 0, 8, 0, 0,
            3, b'H', b'i', 0, 0, 0, 0, 0,
            0, 0,
        ];
        let path = write(&dir, "in.mp3", &bytes);

        let m = TagManager::default();
        assert_eq!(m.get_frame_value(&path, "title").unwrap().as_deref(), Some("Hi"));
        assert_eq!(m.get_frame_value(&path, "album").unwrap(), None);

        let tag = m.get_frames(&path).unwrap();
        assert_eq!(tag.len(), 1);
    }

    #[test]
    fn unknown_name_is_rejected_before_the_file_is_opened() {
        let err = TagManager::default()
            .get_frame_value("/definitely/not/here.mp3", "composer")
            .unwrap_err();
        assert!(matches!(err, TagError::UnknownFrameName(ref n) if n == "composer"));
        assert_eq!(err.kind(), ErrorKind::UnknownFrameName);
    }

    #[test]
    fn names_are_case_sensitive() {
        let dir = tempdir().unwrap();
        let path = write(&dir, "in.mp3", &tagged(&[("TIT2", "x")], 0, &[]));
        let err = TagManager::default().get_frame_value(&path, "Title").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownFrameName);
    }

    #[test]
    fn empty_arguments_are_validation_errors() {
        let m = TagManager::default();
        assert_eq!(m.get_frame_value("x.mp3", "").unwrap_err().kind(), ErrorKind::Validation);
        assert_eq!(m.get_frames("").unwrap_err().kind(), ErrorKind::Validation);
    }

    #[test]
    fn missing_file_is_io() {
        let dir = tempdir().unwrap();
        let err = TagManager::default()
            .get_frames(dir.path().join("absent.mp3"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn file_without_tag_is_format() {
        let dir = tempdir().unwrap();
        let path = write(&dir, "raw.mp3", &[0xFF, 0xFB, 0x90, 0x64, 0, 0, 0, 0, 0, 0, 0]);
        let err = TagManager::default().get_frames(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn strict_policy_is_opt_in() {
        let dir = tempdir().unwrap();
        let mut bytes = tagged(&[("TALB", "a")], 0, &[]);
        bytes[10 + 8] = 0x40; // status flag byte of the only frame
        let path = write(&dir, "flagged.mp3", &bytes);

        let lenient = TagManager::default();
        assert_eq!(lenient.get_frame_value(&path, "album").unwrap().as_deref(), Some("a"));

        let strict = TagManager::new(CodecConfig::strict());
        assert_eq!(strict.config().flag_policy, FlagPolicy::Strict);
        assert_eq!(lenient.config().flag_policy, FlagPolicy::Lenient);
        let err = strict.get_frame_value(&path, "album").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFeature(UnsupportedFeature::FrameFlags));
    }

// # ✍️ 2. Writing

    #[test]
    fn sets_title_on_empty_tag_and_keeps_payload() {
        let dir = tempdir().unwrap();
        let src = write(&dir, "in.mp3", &tagged(&[], 0, &PAYLOAD));
        let dst = dir.path().join("out.mp3");

        let report = TagManager::default()
            .set_frame_value(&src, "title", "X", &dst)
            .unwrap();

        let out = fs::read(&dst).unwrap();
        assert_eq!(out.len(), 26);
        assert_eq!(&out[23..], &PAYLOAD);
        assert_eq!(frames_of(&dst), vec![("TIT2".into(), "X".into())]);

        assert_eq!(report.old_region_len, 10);
        assert_eq!(report.new_region_len, 23);
        assert_eq!(report.payload_bytes, 3);
        assert_eq!(report.frames_read, 0);
        assert_eq!(report.frames_written, 1);
        assert_eq!(report.output_len(), out.len() as u64);
        assert_eq!(report.region_delta(), 13);
    }

    #[test]
    fn rewrite_drops_padding_and_keeps_other_frames() {
        let dir = tempdir().unwrap();
        let payload: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
        let src = write(
            &dir,
            "in.mp3",
            &tagged(&[("TALB", "Album"), ("XYZ1", "custom")], 64, &payload),
        );
        let dst = dir.path().join("out.mp3");

        let report = TagManager::default()
            .set_frame_value(&src, "performer", "Someone", &dst)
            .unwrap();
        assert_eq!(report.padding_dropped, 64);
        assert_eq!(report.frames_read, 2);
        assert_eq!(report.frames_written, 3);

        let out = fs::read(&dst).unwrap();
        let tag_len = report.new_region_len as usize;
        assert_eq!(&out[tag_len..], payload.as_slice());
        assert_eq!(
            frames_of(&dst),
            vec![
                ("TALB".into(), "Album".into()),
                ("TPE1".into(), "Someone".into()),
                ("XYZ1".into(), "custom".into()),
            ]
        );
    }

    #[test]
    fn multi_value_frame_survives_rewrite() {
        let dir = tempdir().unwrap();
        let mut bytes = encode_header_for_body(15).unwrap().to_vec();
        bytes.extend_from_slice(&[b'T', b'P', b'E', b'1', 0, 0, 0, 5, 0, 0, 3, b'A', 0, b'B', 0]);
        bytes.extend_from_slice(&PAYLOAD);
        let src = write(&dir, "in.mp3", &bytes);
        let dst = dir.path().join("out.mp3");

        let m = TagManager::default();
        assert_eq!(m.get_frame_value(&src, "performer").unwrap().as_deref(), Some("A\0B"));

        m.set_frame_value(&src, "title", "X", &dst).unwrap();
        assert_eq!(m.get_frame_value(&dst, "performer").unwrap().as_deref(), Some("A\0B"));
        assert_eq!(
            frames_of(&dst),
            vec![("TIT2".into(), "X".into()), ("TPE1".into(), "A\0B".into())]
        );
    }

    #[test]
    fn replaces_existing_value() {
        let dir = tempdir().unwrap();
        let src = write(&dir, "in.mp3", &tagged(&[("TIT2", "old")], 0, &PAYLOAD));
        let dst = dir.path().join("out.mp3");

        let m = TagManager::default();
        m.set_frame_value(&src, "title", "new", &dst).unwrap();
        assert_eq!(m.get_frame_value(&dst, "title").unwrap().as_deref(), Some("new"));
        // source untouched
        assert_eq!(m.get_frame_value(&src, "title").unwrap().as_deref(), Some("old"));
    }

    #[test]
    fn empty_value_is_allowed() {
        let dir = tempdir().unwrap();
        let src = write(&dir, "in.mp3", &tagged(&[], 0, &[]));
        let dst = dir.path().join("out.mp3");

        let m = TagManager::default();
        m.set_frame_value(&src, "track", "", &dst).unwrap();
        assert_eq!(m.get_frame_value(&dst, "track").unwrap().as_deref(), Some(""));
    }

    #[test]
    fn removes_frame() {
        let dir = tempdir().unwrap();
        let src = write(&dir, "in.mp3", &tagged(&[("TIT2", "t"), ("TALB", "a")], 4, &PAYLOAD));
        let dst = dir.path().join("out.mp3");

        let m = TagManager::default();
        m.remove_frame(&src, "title", &dst).unwrap();
        assert_eq!(frames_of(&dst), vec![("TALB".into(), "a".into())]);

        // absent frame: still a successful rewrite
        let dst2 = dir.path().join("out2.mp3");
        m.remove_frame(&dst, "title", &dst2).unwrap();
        assert_eq!(fs::read(&dst).unwrap(), fs::read(&dst2).unwrap());
    }

    #[test]
    fn set_by_raw_id() {
        let dir = tempdir().unwrap();
        let src = write(&dir, "in.mp3", &tagged(&[], 0, &PAYLOAD));
        let dst = dir.path().join("out.mp3");

        TagManager::default()
            .set_frame_value_by_id(&src, FrameId::new("TCON").unwrap(), "Jazz", &dst)
            .unwrap();
        assert_eq!(frames_of(&dst), vec![("TCON".into(), "Jazz".into())]);
    }

    #[test]
    fn output_must_differ_from_input() {
        let dir = tempdir().unwrap();
        let original = tagged(&[("TIT2", "keep")], 0, &PAYLOAD);
        let src = write(&dir, "in.mp3", &original);

        let m = TagManager::default();
        let err = m.set_frame_value(&src, "title", "x", &src).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        // same file through a different spelling
        let alias = dir.path().join(".").join("in.mp3");
        let err = m.set_frame_value(&src, "title", "x", &alias).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        assert_eq!(fs::read(&src).unwrap(), original);
    }

    #[test]
    fn invalid_source_creates_no_output() {
        let dir = tempdir().unwrap();
        let mut bytes = tagged(&[], 0, &PAYLOAD);
        bytes[3] = 3;
        let src = write(&dir, "v23.mp3", &bytes);
        let dst = dir.path().join("out.mp3");

        let err = TagManager::default()
            .set_frame_value(&src, "title", "x", &dst)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedVersion);
        assert!(!dst.exists());
    }

    #[test]
    fn unknown_name_on_write_creates_no_output() {
        let dir = tempdir().unwrap();
        let src = write(&dir, "in.mp3", &tagged(&[], 0, &PAYLOAD));
        let dst = dir.path().join("out.mp3");

        let err = TagManager::default()
            .set_frame_value(&src, "genre", "x", &dst)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownFrameName);
        assert!(!dst.exists());
    }

    #[test]
    fn report_serializes() {
        let dir = tempdir().unwrap();
        let src = write(&dir, "in.mp3", &tagged(&[], 0, &PAYLOAD));
        let dst = dir.path().join("out.mp3");

        let report = TagManager::default()
            .set_frame_value(&src, "album", "A", &dst)
            .unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["payload_bytes"], 3);
        assert_eq!(json["old_region_len"], 10);
        assert_eq!(json["new_region_len"], 23);
    }
}
