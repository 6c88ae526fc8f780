use camino::Utf8PathBuf;
use resobox::config::EngineConfig;
use resobox::layout::Projection;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn defaults_match_the_reference_constants() {
    let c = EngineConfig::default();
    assert_eq!(c.base_size, 12.0);
    assert_eq!(c.decay_2d, 0.86);
    assert!((c.decay_3d - 0.816_496_580_927_726).abs() < 1e-12);
    assert_eq!(c.epsilon_3d, 0.005);
    assert_eq!(c.label_limit_threshold, 18);
    assert_eq!(c.default_visible_count, 15);
    assert_eq!(c.signal_ttl_secs, 3600);
    assert!(c.validate().is_ok());
}

#[test]
fn partial_json_keeps_other_defaults() {
    let c = EngineConfig::from_json(r#"{"baseSize": 300, "decay2d": 0.9}"#).unwrap();
    assert_eq!(c.base_size, 300.0);
    assert_eq!(c.layout_params().size_at(Projection::TwoD, 1), 270.0);
    assert_eq!(c.label_policy().limit_threshold, 18);
}

#[test]
fn rejects_invalid_values() {
    assert!(EngineConfig::from_json(r#"{"baseSize": 0}"#).is_err());
    assert!(EngineConfig::from_json(r#"{"decay3d": 1.5}"#).is_err());
    assert!(EngineConfig::from_json(r#"{"epsilon3d": -1}"#).is_err());
    assert!(EngineConfig::from_json(r#"{"signalTtlSecs": 0}"#).is_err());
    assert!(EngineConfig::from_json("not json").is_err());
}

#[test]
fn loads_from_file() -> anyhow::Result<()> {
    let mut f = NamedTempFile::new()?;
    write!(f, r#"{{"edgeHitZone": 24.0}}"#)?;
    f.flush()?;
    let path = Utf8PathBuf::from_path_buf(f.path().to_path_buf())
        .map_err(|p| anyhow::anyhow!("non-UTF8 temp path {:?}", p))?;
    let c = EngineConfig::load(&path)?;
    assert_eq!(c.edge_hit_zone, 24.0);
    assert!(EngineConfig::load("/nonexistent/resobox.json").is_err());
    Ok(())
}
