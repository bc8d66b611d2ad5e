use colormap_intervals::{Bounds, ColorRange, ColorValue, EditorConfig,
                         Error, Interval, JsonRepository, MemoryRepository,
                         Partition, Repository, Session, import_legacy_dir};
use tempfile::tempdir;

fn intervals(s: &Session) -> Vec<(String, f64, f64)> {
    s.current_partition().intervals().iter()
        .map(|i| (i.color.to_string(), i.min, i.max))
        .collect()
}

fn expect(v: &[(&str, f64, f64)]) -> Vec<(String, f64, f64)> {
    v.iter().map(|&(c, a, b)| (c.to_string(), a, b)).collect()
}

fn assert_covers(p: &Partition, b: Bounds) {
    let iv = p.intervals();
    assert_eq!(iv[0].min, b.min());
    assert_eq!(iv[iv.len() - 1].max, b.max());
    for w in iv.windows(2) {
        assert_eq!(w[0].max, w[1].min);
    }
}

#[test]
fn edit_scenario() {
    let mut s = Session::default();
    assert_eq!(intervals(&s), expect(&[("white", 0., 100.)]));

    s.insert("red", 20., 40.).unwrap();
    assert_eq!(intervals(&s), expect(&[("white", 0., 20.), ("red", 20., 40.),
                                       ("white", 40., 100.)]));

    s.trim_and_expand(10., 90.).unwrap();
    assert_eq!(intervals(&s), expect(&[("white", 10., 20.), ("red", 20., 40.),
                                       ("white", 40., 90.)]));

    s.replace_background_color("gray");
    assert_eq!(intervals(&s), expect(&[("gray", 10., 20.), ("red", 20., 40.),
                                       ("gray", 40., 90.)]));
    assert_eq!(s.background().as_str(), "gray");

    s.reset();
    assert_eq!(intervals(&s), expect(&[("white", 0., 100.)]));
    assert_eq!(s.background().as_str(), "white");
    assert_eq!(s.bounds(), Bounds::default());
}

#[test]
fn coverage_survives_any_edit_sequence() {
    let mut s = Session::default();
    let edits: &[(&str, f64, f64)] = &[
        ("red", 20., 40.), ("blue", -10., 5.), ("green", 35., 70.),
        ("yellow", 99., 150.), ("red", 0., 100.), ("black", 50., 51.),
    ];
    for &(c, a, b) in edits {
        s.insert(c, a, b).unwrap();
        assert_covers(s.current_partition(), s.bounds());
        let p = s.current_partition();
        let mid = (a.max(0.) + b.min(100.)) / 2.;
        assert_eq!(p.color_at(mid).map(|c| c.as_str()), Some(c));
    }
    for &(a, b) in &[(-20., 30.), (25., 26.), (-1e6, 1e6)] {
        s.trim_and_expand(a, b).unwrap();
        assert_covers(s.current_partition(), Bounds::new(a, b).unwrap());
    }
}

#[test]
fn trim_and_expand_twice_is_once() {
    let mut s = Session::default();
    s.insert("red", 20., 40.).unwrap();
    s.insert("blue", 60., 80.).unwrap();
    s.trim_and_expand(30., 150.).unwrap();
    let once = s.current_partition().clone();
    s.trim_and_expand(30., 150.).unwrap();
    assert_eq!(s.current_partition(), &once);
}

#[test]
fn background_substitution() {
    let mut s = Session::default();
    s.insert("red", 20., 40.).unwrap();
    let bounds: Vec<_> = s.current_partition().boundaries().collect();
    s.replace_background_color("lightblue");
    assert!(s.current_partition().intervals().iter()
            .all(|i| i.color != ColorValue::new("white")));
    assert_eq!(s.current_partition().boundaries().collect::<Vec<_>>(), bounds);
    // New gaps are filled with the new background.
    s.trim_and_expand(0., 200.).unwrap();
    assert_eq!(s.current_partition().intervals().last().map(|i| i.max), Some(200.));
    assert_eq!(s.current_partition().intervals().last()
               .map(|i| i.color.as_str()), Some("lightblue"));
}

#[test]
fn ramp_of_session() {
    let mut s = Session::default();
    s.insert("red", 20., 40.).unwrap();
    s.trim_and_expand(10., 90.).unwrap();
    let ramp = s.ramp();
    assert_eq!((ramp.scale_min(), ramp.scale_max()), (10., 90.));
    let labels: Vec<_> = ramp.ticks().into_iter().map(|t| t.label).collect();
    assert_eq!(labels, ["10.00", "20.00", "40.00", "90.00"]);
    assert_eq!(ramp.color(0.2).as_str(), "red");
    assert_eq!(ramp.color(0.5).as_str(), "white");
    let b = s.bounds();
    for (n, i) in ramp.bands().iter().zip(s.current_partition().intervals()) {
        assert!((n.min * b.width() + b.min() - i.min).abs() < 1e-9);
    }
}

#[test]
fn save_and_load_through_json_file() {
    let dir = tempdir().unwrap();
    let config = EditorConfig { store_path: Some(dir.path().join("maps.json")),
                                ..EditorConfig::default() };
    let mut s = Session::new(config);
    s.insert("red", 20., 40.).unwrap();
    s.trim_and_expand(-5., 60.).unwrap();
    let saved = s.current_partition().clone();
    let name = {
        let mut repo = s.open_repository().unwrap();
        assert_eq!(s.save(repo.as_mut()).unwrap(), "colormap_01");
        s.reset();
        assert_eq!(s.save(repo.as_mut()).unwrap(), "colormap_02");
        "colormap_01".to_string()
    };

    let repo = JsonRepository::open(dir.path().join("maps.json")).unwrap();
    assert_eq!(repo.list().len(), 2);
    s.load(&repo, &name).unwrap();
    assert_eq!(s.current_partition(), &saved);
    assert_eq!(s.bounds(), Bounds::new(-5., 60.).unwrap());
    assert!(matches!(s.load(&repo, "colormap_03"), Err(Error::NotFound(_))));
    assert_eq!(s.current_partition(), &saved);
}

#[test]
fn import_then_save() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("colormap_01.json"), r#"{
        "data": [{"color": "rgb(0,0,255)", "min": -1, "max": 1}],
        "mincolormap": -1, "maxcolormap": 1 }"#).unwrap();
    let mut repo = MemoryRepository::new();
    for saved in import_legacy_dir(dir.path(), &ColorValue::background()).unwrap() {
        repo.import(saved).unwrap();
    }
    let mut s = Session::default();
    assert_eq!(s.save(&mut repo).unwrap(), "colormap_02");
    s.load(&repo, "colormap_01").unwrap();
    let iv = &s.current_partition().intervals()[0];
    assert_eq!(iv, &Interval::new("rgb(0,0,255)", -1., 1.).unwrap());
    assert_eq!(iv.color.to_hex().as_str(), "#0000ff");
}
