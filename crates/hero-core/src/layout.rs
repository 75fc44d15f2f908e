//! Fixed placement of the logo discs inside the disc group.

use glam::Vec3;

/// The six logos shown in the hero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LogoKind {
    Docusign,
    Shopify,
    Nbc,
    Xero,
    Lightspeed,
    Mindfeel,
}

/// Group order. Intro stagger and draw bookkeeping follow this order.
pub const LOGO_ORDER: [LogoKind; 6] = [
    LogoKind::Docusign,
    LogoKind::Shopify,
    LogoKind::Nbc,
    LogoKind::Xero,
    LogoKind::Lightspeed,
    LogoKind::Mindfeel,
];

impl LogoKind {
    pub fn name(self) -> &'static str {
        match self {
            LogoKind::Docusign => "docusign",
            LogoKind::Shopify => "shopify",
            LogoKind::Nbc => "nbc",
            LogoKind::Xero => "xero",
            LogoKind::Lightspeed => "lightspeed",
            LogoKind::Mindfeel => "mindfeel",
        }
    }

    /// Image path relative to the page.
    pub fn asset_path(self) -> &'static str {
        match self {
            LogoKind::Docusign => "assets/docusign-logo.jpg",
            LogoKind::Shopify => "assets/shopify.jpg",
            LogoKind::Nbc => "assets/nbc-logo.jpg",
            LogoKind::Xero => "assets/xero-logo.jpg",
            LogoKind::Lightspeed => "assets/lightspeed.jpg",
            LogoKind::Mindfeel => "assets/mindfeel-logo.jpg",
        }
    }

    /// Resting position in disc-group space.
    pub fn home(self) -> Vec3 {
        match self {
            LogoKind::Xero => Vec3::new(0.0, 0.0, 0.0),
            LogoKind::Docusign => Vec3::new(-0.6, 1.25, 0.0),
            LogoKind::Lightspeed => Vec3::new(0.9, 1.075, 0.0),
            LogoKind::Mindfeel => Vec3::new(1.0, -1.0, 0.0),
            LogoKind::Nbc => Vec3::new(-1.1, -0.85, 0.0),
            LogoKind::Shopify => Vec3::new(-1.6, 0.35, 0.0),
        }
    }
}
