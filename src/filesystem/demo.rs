use crate::filesystem::{Container, Leaf};

pub const DEMO_ROOT_NAME: &str = "projet";

/// Builds the sample project every fresh session starts from.
pub fn create_demo_structure() -> Container {
    let mut root = Container::new(DEMO_ROOT_NAME);

    let mut src = Container::new("src");
    src.add(Leaf::new("index.ts", 15));
    src.add(Leaf::new("app.ts", 25));

    let mut components = Container::new("components");
    components.add(Leaf::new("Button.tsx", 8));
    components.add(Leaf::new("Card.tsx", 12));
    components.add(Leaf::new("Modal.tsx", 18));
    src.add(components);

    let mut assets = Container::new("assets");
    assets.add(Leaf::new("logo.png", 45));
    assets.add(Leaf::new("styles.css", 10));

    root.add(src);
    root.add(assets);
    root.add(Leaf::new("package.json", 2));
    root.add(Leaf::new("README.md", 5));

    root
}
