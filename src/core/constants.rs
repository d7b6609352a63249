//! Static page content: navigation, feature cards, footer links and the
//! performance image layout.

use crate::core::layout::{PerformanceImage, PositionSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureCard {
    pub id: u32,
    pub icon: &'static str,
    pub highlight: &'static str,
    pub text: &'static str,
    pub styles: &'static str,
}

/// One step of the feature tour: which video plays on the model's screen
/// and which card is revealed with it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureSequenceEntry {
    pub video_path: &'static str,
    pub box_class: &'static str,
    pub delay: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FooterLink {
    pub label: &'static str,
    pub link: &'static str,
}

pub const NAV_LINKS: &[NavLink] = &[
    NavLink { label: "Store" },
    NavLink { label: "Mac" },
    NavLink { label: "iPhone" },
    NavLink { label: "Watch" },
    NavLink { label: "Vision" },
    NavLink { label: "AirPods" },
];

/// Mesh names of the laptop model that keep their factory material when the
/// finish is changed (screen, keyboard, logo).
pub const NO_CHANGE_PARTS: &[&str] = &[
    "Object_84",
    "Object_35",
    "Object_10",
    "Object_6",
    "Object_106",
    "Object_112",
];

pub const PERFORMANCE_IMAGES: &[PerformanceImage] = &[
    PerformanceImage { id: "p1", src: "/performance1.png", alt: None },
    PerformanceImage { id: "p2", src: "/performance2.png", alt: None },
    PerformanceImage { id: "p3", src: "/performance3.png", alt: None },
    PerformanceImage { id: "p4", src: "/performance4.png", alt: None },
    PerformanceImage { id: "p5", src: "/performance5.jpg", alt: None },
    PerformanceImage { id: "p6", src: "/performance6.png", alt: None },
    PerformanceImage { id: "p7", src: "/performance7.png", alt: None },
];

pub const PERFORMANCE_IMG_POSITIONS: &[PositionSpec] = &[
    PositionSpec::left("p1", 5.0, 65.0),
    PositionSpec::right("p2", 10.0, 60.0),
    PositionSpec::right("p3", -5.0, 45.0),
    PositionSpec::right("p4", -10.0, 0.0),
    PositionSpec::left("p5", 20.0, 50.0).at_rest(),
    PositionSpec::left("p6", 2.0, 30.0),
    PositionSpec::left("p7", -5.0, 0.0),
];

pub const FEATURES: &[FeatureCard] = &[
    FeatureCard {
        id: 1,
        icon: "/feature-icon1.svg",
        highlight: "Email AI.",
        text: "Summarize and draft replies to emails instantly, so you stay on top of your inbox.",
        styles: "left-5 md:left-20 top-[20%] opacity-0 translate-y-5",
    },
    FeatureCard {
        id: 2,
        icon: "/feature-icon2.svg",
        highlight: "Image AI.",
        text: "Generate or edit images with simple prompts, perfect for projects and creativity.",
        styles: "right-5 md:right-20 top-[30%] opacity-0 translate-y-5",
    },
    FeatureCard {
        id: 3,
        icon: "/feature-icon3.svg",
        highlight: "Summarize AI.",
        text: "Turn long articles, reports, or notes into clear and concise summaries in seconds.",
        styles: "left-5 md:left-20 top-[50%] opacity-0 translate-y-5",
    },
    FeatureCard {
        id: 4,
        icon: "/feature-icon4.svg",
        highlight: "AirDrop.",
        text: "Wirelessly share photos, large files, and more between your iPhone, your Mac, and other devices.",
        styles: "right-5 md:right-20 top-[70%] opacity-0 translate-y-5",
    },
    FeatureCard {
        id: 5,
        icon: "/feature-icon5.svg",
        highlight: "Writing Tool.",
        text: "Write smarter and faster with AI that helps you craft polished content.",
        styles: "left-5 md:left-20 top-[90%] opacity-0 translate-y-5",
    },
];

pub const FEATURE_SEQUENCE: &[FeatureSequenceEntry] = &[
    FeatureSequenceEntry { video_path: "/videos/feature-1.mp4", box_class: ".box1", delay: 1.0 },
    FeatureSequenceEntry { video_path: "/videos/feature-2.mp4", box_class: ".box2", delay: 0.0 },
    FeatureSequenceEntry { video_path: "/videos/feature-3.mp4", box_class: ".box3", delay: 0.0 },
    FeatureSequenceEntry { video_path: "/videos/feature-4.mp4", box_class: ".box4", delay: 0.0 },
    FeatureSequenceEntry { video_path: "/videos/feature-5.mp4", box_class: ".box5", delay: 0.0 },
];

pub const FOOTER_LINKS: &[FooterLink] = &[
    FooterLink { label: "Privacy Policy", link: "#" },
    FooterLink { label: "Terms of Use", link: "#" },
    FooterLink { label: "Sales Policy", link: "#" },
    FooterLink { label: "Legal", link: "#" },
    FooterLink { label: "Site Map", link: "#" },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::layout::Anchor;
    use std::collections::HashSet;

    fn is_digits(s: &str) -> bool {
        !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
    }

    #[test]
    fn test_performance_image_ids_are_sequential() {
        let ids: Vec<_> = PERFORMANCE_IMAGES.iter().map(|i| i.id).collect();
        assert_eq!(ids, ["p1", "p2", "p3", "p4", "p5", "p6", "p7"]);
    }

    #[test]
    fn test_performance_image_paths() {
        for image in PERFORMANCE_IMAGES {
            let name = image.src.strip_prefix("/performance").unwrap();
            let (num, ext) = name.split_once('.').unwrap();
            assert!(is_digits(num), "bad path {}", image.src);
            if image.id == "p5" {
                assert_eq!(ext, "jpg");
            } else {
                assert_eq!(ext, "png");
            }
        }
    }

    #[test]
    fn test_position_ids_match_image_ids() {
        let images: HashSet<_> = PERFORMANCE_IMAGES.iter().map(|i| i.id).collect();
        let positions: HashSet<_> = PERFORMANCE_IMG_POSITIONS.iter().map(|p| p.id).collect();
        assert_eq!(images, positions);
        assert_eq!(positions.len(), PERFORMANCE_IMG_POSITIONS.len());
    }

    #[test]
    fn test_animate_flags() {
        let p5 = PERFORMANCE_IMG_POSITIONS.iter().find(|p| p.id == "p5").unwrap();
        assert!(!p5.animate);
        let animated = PERFORMANCE_IMG_POSITIONS.iter().filter(|p| p.animate).count();
        assert_eq!(animated, 6);
    }

    #[test]
    fn test_positions_in_range_with_some_negative() {
        for position in PERFORMANCE_IMG_POSITIONS {
            assert!((-100.0..=100.0).contains(&position.anchor.value()));
            assert!((0.0..=100.0).contains(&position.bottom));
        }
        assert!(PERFORMANCE_IMG_POSITIONS.iter().any(|p| p.anchor.value() < 0.0));
    }

    #[test]
    fn test_known_anchors() {
        assert_eq!(PERFORMANCE_IMG_POSITIONS[0].anchor, Anchor::Left(5.0));
        assert_eq!(PERFORMANCE_IMG_POSITIONS[0].bottom, 65.0);
        assert_eq!(PERFORMANCE_IMG_POSITIONS[1].anchor, Anchor::Right(10.0));
        assert_eq!(PERFORMANCE_IMG_POSITIONS[1].bottom, 60.0);
    }

    #[test]
    fn test_nav_links() {
        let labels: Vec<_> = NAV_LINKS.iter().map(|l| l.label).collect();
        assert!(labels.iter().all(|l| !l.is_empty()));
        for expected in ["Store", "Mac", "iPhone"] {
            assert!(labels.contains(&expected));
        }
    }

    #[test]
    fn test_no_change_parts_naming() {
        let unique: HashSet<_> = NO_CHANGE_PARTS.iter().collect();
        assert_eq!(unique.len(), NO_CHANGE_PARTS.len());
        for part in NO_CHANGE_PARTS {
            let num = part.strip_prefix("Object_").unwrap();
            assert!(is_digits(num));
        }
    }

    #[test]
    fn test_features() {
        let ids: HashSet<_> = FEATURES.iter().map(|f| f.id).collect();
        assert_eq!(ids.len(), FEATURES.len());
        for feature in FEATURES {
            let num = feature
                .icon
                .strip_prefix("/feature-icon")
                .and_then(|s| s.strip_suffix(".svg"))
                .unwrap();
            assert!(is_digits(num));
            assert!(!feature.highlight.is_empty());
            assert!(!feature.text.is_empty());
        }
    }

    #[test]
    fn test_feature_sequence() {
        assert_eq!(FEATURE_SEQUENCE.len(), FEATURES.len());
        for (i, entry) in FEATURE_SEQUENCE.iter().enumerate() {
            assert_eq!(entry.video_path, format!("/videos/feature-{}.mp4", i + 1));
            assert_eq!(entry.box_class, format!(".box{}", i + 1));
            assert!(entry.delay >= 0.0);
        }
    }

    #[test]
    fn test_footer_links() {
        let labels: Vec<_> = FOOTER_LINKS.iter().map(|l| l.label).collect();
        assert!(labels.iter().all(|l| !l.is_empty()));
        assert!(labels.contains(&"Privacy Policy"));
        assert!(labels.contains(&"Terms of Use"));
    }
}
