use super::common::listing;
use movie_dupecheck::duplicates::{Analysis, DecisionPolicy};
use movie_dupecheck::manifest::{load_collection, Collection};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_nas_export_against_directory() {
    let dir = tempdir().unwrap();
    let hd = listing(
        dir.path(),
        "HD",
        &[
            "\\@eaDir",
            "41G|Alien (1979)/",
            "9.8G|Alien.1979.1080p.BluRay/",
            "12G|Heat (1995)/",
            "",
            "3.1G|@Recycle/",
        ],
    );
    let uhd = dir.path().join("Movies-UHD");
    fs::create_dir_all(uhd.join("Heat.1995.2160p.UHD.BluRay")).unwrap();
    fs::create_dir_all(uhd.join("@eaDir")).unwrap();
    fs::create_dir_all(uhd.join(".snapshot")).unwrap();

    let hd = load_collection(&hd, Collection::Hd);
    let uhd = load_collection(&uhd, Collection::Uhd);
    assert_eq!(hd.entries.len(), 3);
    assert_eq!(uhd.entries.len(), 1);

    let analysis = Analysis::new(&hd.entries, &uhd.entries, &DecisionPolicy::default());

    assert_eq!(analysis.hd.len(), 1);
    assert_eq!(analysis.hd[0].key.as_str(), "Alien (1979)");
    assert_eq!(analysis.cross.len(), 1);
    assert_eq!(analysis.cross[0].key.as_str(), "Heat (1995)");
    assert_eq!(analysis.cross[0].uhd[0].name, "Heat.1995.2160p.UHD.BluRay");
}

#[test]
fn test_short_titles_never_cross_match() {
    let dir = tempdir().unwrap();
    let hd = listing(dir.path(), "HD", &["A", "Be", "Cat", "Dune"]);
    let uhd = listing(dir.path(), "UHD", &["A", "Be", "Cat", "Dune"]);

    let hd = load_collection(&hd, Collection::Hd);
    let uhd = load_collection(&uhd, Collection::Uhd);
    let analysis = Analysis::new(&hd.entries, &uhd.entries, &DecisionPolicy::default());

    let keys: Vec<&str> = analysis.cross.iter().map(|g| g.key.as_str()).collect();
    assert_eq!(keys, vec!["Dune"]);

    let relaxed = DecisionPolicy::default().with_min_cross_key_len(0);
    let analysis = Analysis::new(&hd.entries, &uhd.entries, &relaxed);
    assert_eq!(analysis.cross.len(), 4);
}
