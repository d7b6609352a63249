//! The landing page sections, in page order.

pub mod features;
pub mod footer;
pub mod hero;
pub mod highlights;
pub mod navbar;
pub mod performance;
pub mod product_viewer;
pub mod showcase;

pub use features::Features;
pub use footer::Footer;
pub use hero::Hero;
pub use highlights::Highlights;
pub use navbar::Navbar;
pub use performance::Performance;
pub use product_viewer::ProductViewer;
pub use showcase::Showcase;
