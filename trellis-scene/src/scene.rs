//! Scene description files.
//!
//! A scene is a JSON tree of nodes. Containers name their layout and each
//! child may carry the slot settings of that layout:
//!
//! ```json
//! {
//!   "kind": "container",
//!   "layout": { "type": "list", "orientation": "Horizontal" },
//!   "children": [
//!     { "kind": "block", "hint": { "width": 50, "height": 20 },
//!       "list": { "sizing": "Expanding" } },
//!     { "kind": "text", "text": "hello world" }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use trellis::layout::{
    AnchorLayout, AnchorSlot, AnchorStrategy, ContainerLayout, ListLayout, ListSlot, ListStrategy,
    StackLayout,
};
use trellis::{
    ArrangeConfig, Block, Container, Control, Orientation, Padding, Point, Size, TextBlock,
};

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid scene: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("the root node must be a container")]
    RootNotContainer,

    #[error("child {index} of {parent} has {kind} slot settings but the layout is {layout}")]
    SlotMismatch {
        parent: String,
        index: usize,
        kind: &'static str,
        layout: &'static str,
    },
}

/// A node of the scene tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    Block {
        #[serde(default)]
        label: Option<String>,
        hint: Size,
        #[serde(default)]
        min: Option<Size>,
        #[serde(default)]
        max: Option<Size>,
        #[serde(default)]
        position: Option<Point>,
        #[serde(default)]
        on_top: bool,
        #[serde(default = "visible")]
        visible: bool,
    },
    Text {
        #[serde(default)]
        label: Option<String>,
        text: String,
        #[serde(default)]
        char_width: Option<i32>,
        #[serde(default)]
        line_height: Option<i32>,
    },
    Container {
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        layout: LayoutSpec,
        #[serde(default)]
        padding: Padding,
        #[serde(default)]
        position: Option<Point>,
        #[serde(default)]
        children: Vec<Child>,
    },
}

fn visible() -> bool {
    true
}

/// A child node plus the slot settings its parent's layout should use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Child {
    #[serde(flatten)]
    pub node: Node,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<ListSlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<AnchorSlot>,
}

/// Which layout a container uses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayoutSpec {
    List {
        #[serde(default)]
        orientation: Orientation,
        #[serde(default)]
        config: ArrangeConfig,
    },
    Anchor {
        #[serde(default)]
        config: ArrangeConfig,
    },
    Stack {
        #[serde(default)]
        config: ArrangeConfig,
    },
    #[default]
    Free,
}

impl LayoutSpec {
    fn name(&self) -> &'static str {
        match self {
            LayoutSpec::List { .. } => "list",
            LayoutSpec::Anchor { .. } => "anchor",
            LayoutSpec::Stack { .. } => "stack",
            LayoutSpec::Free => "free",
        }
    }
}

/// Parse a scene from JSON text.
pub fn parse(text: &str) -> Result<Node, SceneError> {
    Ok(serde_json::from_str(text)?)
}

/// Read and parse a scene file.
pub fn load(path: &std::path::Path) -> Result<Node, SceneError> {
    let text = std::fs::read_to_string(path)?;
    parse(&text)
}

/// Build the control tree for a scene whose root is a container.
pub fn build_root(node: &Node) -> Result<Container, SceneError> {
    match node {
        Node::Container { .. } => build_container(node),
        _ => Err(SceneError::RootNotContainer),
    }
}

fn build(node: &Node) -> Result<Box<dyn Control>, SceneError> {
    match node {
        Node::Block {
            label,
            hint,
            min,
            max,
            position,
            on_top,
            visible,
        } => {
            let mut block = Block::new(
                *hint,
                min.unwrap_or(Size::ZERO),
                max.unwrap_or(Size::UNBOUNDED),
            );
            if let Some(label) = label {
                block = block.label(label.clone());
            }
            if let Some(position) = position {
                block = block.at(*position);
            }
            if *on_top {
                block = block.on_top();
            }
            block.set_visible(*visible);
            Ok(Box::new(block))
        }
        Node::Text {
            label,
            text,
            char_width,
            line_height,
        } => {
            let mut block = TextBlock::new(text.clone());
            if let Some(label) = label {
                block = block.label(label.clone());
            }
            if char_width.is_some() || line_height.is_some() {
                block = block.metrics(
                    char_width.unwrap_or(TextBlock::DEFAULT_CHAR_WIDTH),
                    line_height.unwrap_or(TextBlock::DEFAULT_LINE_HEIGHT),
                );
            }
            Ok(Box::new(block))
        }
        Node::Container { .. } => Ok(Box::new(build_container(node)?)),
    }
}

fn build_container(node: &Node) -> Result<Container, SceneError> {
    let Node::Container {
        label,
        layout,
        padding,
        position,
        children,
    } = node
    else {
        return Err(SceneError::RootNotContainer);
    };

    let mut container = match layout {
        LayoutSpec::List {
            orientation,
            config,
        } => Container::new().with_layout(ListLayout::list(*orientation).with_config(*config)),
        LayoutSpec::Anchor { config } => {
            Container::new().with_layout(AnchorLayout::anchor().with_config(*config))
        }
        LayoutSpec::Stack { config } => {
            Container::new().with_layout(StackLayout::stack().with_config(*config))
        }
        LayoutSpec::Free => Container::new().with_layout(ContainerLayout::free()),
    };
    container = container.with_padding(*padding);
    if let Some(label) = label {
        container = container.label(label.clone());
    }
    if let Some(position) = position {
        container = container.at(*position);
    }

    let parent = label.as_deref().unwrap_or("container").to_string();
    for child in children {
        let control = build(&child.node)?;
        let index = container.add_child(control, container.child_count());
        apply_slot(&mut container, layout, &parent, index, child)?;
    }

    tracing::debug!(
        "built {} with {} children ({} layout)",
        parent,
        container.child_count(),
        layout.name()
    );
    Ok(container)
}

fn apply_slot(
    container: &mut Container,
    layout: &LayoutSpec,
    parent: &str,
    index: usize,
    child: &Child,
) -> Result<(), SceneError> {
    let mismatch = |kind| SceneError::SlotMismatch {
        parent: parent.to_string(),
        index,
        kind,
        layout: layout.name(),
    };

    if let Some(slot) = child.list {
        container
            .configure_layout::<ListStrategy, _>(|l| l.set_list_slot(index, slot))
            .ok_or_else(|| mismatch("list"))?;
    }
    if let Some(slot) = child.anchor {
        container
            .configure_layout::<AnchorStrategy, _>(|l| l.set_anchor_slot(index, slot))
            .ok_or_else(|| mismatch("anchor"))?;
    }
    Ok(())
}
