use std::cmp::Ordering;

use aurkeep::package::FilenameParser;
use aurkeep::version::ArchVersion;

#[test]
fn parse_extracts_name_version_and_arch() {
    let parser = FilenameParser::new();

    let parsed = parser
        .parse("localsend-bin-1.14.4-1-x86_64.pkg.tar.zst")
        .unwrap();
    assert_eq!(parsed.name, "localsend-bin");
    assert_eq!(parsed.version, "1.14.4-1");
    assert_eq!(parsed.arch, "x86_64");

    let parsed = parser
        .parse("claude-code-2.1.59-1-x86_64.pkg.tar.zst")
        .unwrap();
    assert_eq!(parsed.name, "claude-code");
    assert_eq!(parsed.version, "2.1.59-1");
    assert_eq!(parsed.arch, "x86_64");
}

#[test]
fn parse_rejects_anything_without_the_package_extension() {
    let parser = FilenameParser::new();

    for filename in [
        "localsend-bin-1.14.4-1-x86_64.pkg.tar.gz",
        "localsend-bin-1.14.4-1-x86_64.pkg.tar.zst.sig",
        "repo.db.tar.gz",
        "README.md",
    ] {
        assert_eq!(parser.parse(filename), None, "accepted {filename}");
    }
}

#[test]
fn every_accepted_filename_round_trips() {
    let parser = FilenameParser::new();

    for filename in [
        "localsend-bin-1.14.4-1-x86_64.pkg.tar.zst",
        "claude-code-2.1.59-1-x86_64.pkg.tar.zst",
        "baidunetdisk-bin-4.17.7-1-x86_64.pkg.tar.zst",
        "dingtalk-bin-7.0.33.11433-1-x86_64.pkg.tar.zst",
        "hysteria-bin-1.3.5-1-x86_64.pkg.tar.zst",
        "6tunnel-0.13-1-i686.pkg.tar.zst",
        "ugrep-git-7.5.0.r4.g1a2b3c4-1-armv7h.pkg.tar.zst",
    ] {
        let parsed = parser.parse(filename).unwrap();
        assert_eq!(parsed.to_string(), filename);
        assert_eq!(parser.parse(&parsed.to_string()), Some(parsed));
    }
}

#[test]
fn version_order_matches_pacman_expectations() {
    let cases = [
        ("1.2.3-1", "1.2.3-2", Ordering::Less),
        ("1:1.0-1", "2.0-1", Ordering::Greater),
        ("1.2.3", "1.2.3.r1.g1234abc", Ordering::Less),
        ("7.0.33.11433-1", "7.0.33.11432-1", Ordering::Greater),
        ("1.14.4-1", "1.14.4-1", Ordering::Equal),
    ];

    for (a, b, expected) in cases {
        assert_eq!(
            ArchVersion::parse(a).cmp(&ArchVersion::parse(b)),
            expected,
            "compare({a}, {b})"
        );
    }
}

#[test]
fn version_order_is_total_over_generated_strings() {
    // Cross product of epochs, pkgvers, and releases gives a broad sample;
    // the order must be reflexive, antisymmetric, and transitive over it.
    let epochs = ["", "1:", "2:"];
    let pkgvers = ["1.0", "1.0a", "1.0.1", "1.2.3", "1.2.3.r1.g1234abc", "20240101"];
    let releases = ["", "-1", "-2", "-rc1"];

    let mut keys = Vec::new();
    for epoch in epochs {
        for pkgver in pkgvers {
            for release in releases {
                keys.push(ArchVersion::parse(&format!("{epoch}{pkgver}{release}")));
            }
        }
    }

    for a in &keys {
        assert_eq!(a.cmp(a), Ordering::Equal);
        for b in &keys {
            assert_eq!(a.cmp(b), b.cmp(a).reverse());
            for c in &keys {
                if a.cmp(b) == Ordering::Greater && b.cmp(c) == Ordering::Greater {
                    assert_eq!(a.cmp(c), Ordering::Greater);
                }
            }
        }
    }
}
