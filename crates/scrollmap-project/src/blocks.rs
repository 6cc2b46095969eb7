//! Block graph builder.
//!
//! Blocks are created bottom-up: reporters and statements first, then the
//! blocks that consume them. [`BlockGraph::add`] wires `parent` links for
//! every block id used as an input, [`BlockGraph::chain`] wires `next` links
//! for a statement sequence.
//!
//! Input encodings follow the compact `project.json` form:
//!
//! | input | encoding |
//! |-------|----------|
//! | number literal | `[1, [4, "10"]]` |
//! | text literal | `[1, [10, "-460"]]` |
//! | variable | `[3, [12, name, id], [4 or 10, ""]]` |
//! | reporter block | `[3, id, [4 or 10, ""]]` |
//! | boolean / substack | `[2, id]` |
//! | broadcast | `[1, [11, name, id]]` |
//! | menu shadow | `[1, id]` |

use crate::model::Block;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// Reference to a variable by name and id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarRef {
    /// Display name.
    pub name: String,
    /// Unique id.
    pub id: String,
}

impl VarRef {
    /// Creates a reference.
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }

    /// Encoded `VARIABLE` field.
    pub fn field(&self) -> Value {
        json!([self.name, self.id])
    }
}

/// Reference to a broadcast message by name and id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastRef {
    /// Message name.
    pub name: String,
    /// Unique id.
    pub id: String,
}

impl BroadcastRef {
    /// Creates a reference.
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }

    /// Encoded `BROADCAST_OPTION` field.
    pub fn field(&self) -> Value {
        json!([self.name, self.id])
    }
}

/// Kind of shadow a slot falls back to when its reporter is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Numeric slot (`[4, ..]`).
    Number,
    /// Text slot (`[10, ..]`).
    Text,
}

impl Slot {
    fn code(self) -> u8 {
        match self {
            Slot::Number => 4,
            Slot::Text => 10,
        }
    }
}

/// One block input.
#[derive(Debug, Clone)]
pub enum Input {
    /// Literal in a number slot.
    Number(i64),
    /// Literal in a text slot.
    Text(String),
    /// Variable reporter.
    Variable(VarRef, Slot),
    /// Reporter block by id.
    Reporter(String, Slot),
    /// Boolean block by id.
    Boolean(String),
    /// First statement of a C-block body.
    Substack(String),
    /// Broadcast message.
    Broadcast(BroadcastRef),
    /// Menu shadow block by id.
    Menu(String),
}

impl Input {
    /// Block id this input points at, if any.
    fn child(&self) -> Option<&str> {
        match self {
            Input::Reporter(id, _) | Input::Boolean(id) | Input::Substack(id) | Input::Menu(id) => {
                Some(id)
            }
            _ => None,
        }
    }

    fn encode(&self) -> Value {
        match self {
            Input::Number(n) => json!([1, [4, n.to_string()]]),
            Input::Text(s) => json!([1, [10, s]]),
            Input::Variable(var, slot) => json!([3, [12, var.name, var.id], [slot.code(), ""]]),
            Input::Reporter(id, slot) => json!([3, id, [slot.code(), ""]]),
            Input::Boolean(id) | Input::Substack(id) => json!([2, id]),
            Input::Broadcast(msg) => json!([1, [11, msg.name, msg.id]]),
            Input::Menu(id) => json!([1, id]),
        }
    }
}

/// Blocks of one target under construction.
#[derive(Debug, Default)]
pub struct BlockGraph {
    blocks: BTreeMap<String, Block>,
    counter: usize,
}

impl BlockGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> String {
        self.counter += 1;
        format!("b{:04}", self.counter)
    }

    fn insert(
        &mut self,
        opcode: &str,
        inputs: Vec<(&str, Input)>,
        fields: Vec<(&str, Value)>,
        shadow: bool,
    ) -> String {
        let id = self.next_id();

        let mut encoded = Map::new();
        for (name, input) in &inputs {
            if let Some(child) = input.child() {
                if let Some(block) = self.blocks.get_mut(child) {
                    block.parent = Some(id.clone());
                }
            }
            encoded.insert((*name).to_string(), input.encode());
        }

        let fields: Map<String, Value> = fields
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();

        self.blocks.insert(
            id.clone(),
            Block {
                opcode: opcode.to_string(),
                next: None,
                parent: None,
                inputs: encoded,
                fields,
                shadow,
                top_level: false,
                x: None,
                y: None,
            },
        );
        id
    }

    /// Adds a block and adopts every block referenced by its inputs.
    pub fn add(&mut self, opcode: &str, inputs: Vec<(&str, Input)>, fields: Vec<(&str, Value)>) -> String {
        self.insert(opcode, inputs, fields, false)
    }

    /// Adds a menu shadow block.
    pub fn menu(&mut self, opcode: &str, field: &str, value: &str) -> String {
        self.insert(opcode, Vec::new(), vec![(field, json!([value, null]))], true)
    }

    /// Links statements into a stack and returns the first one.
    pub fn chain(&mut self, statements: &[String]) -> Option<String> {
        for pair in statements.windows(2) {
            if let Some(block) = self.blocks.get_mut(&pair[0]) {
                block.next = Some(pair[1].clone());
            }
            if let Some(block) = self.blocks.get_mut(&pair[1]) {
                block.parent = Some(pair[0].clone());
            }
        }
        statements.first().cloned()
    }

    /// Adds a hat block at (x, y) on the canvas with `body` underneath.
    pub fn script(
        &mut self,
        opcode: &str,
        fields: Vec<(&str, Value)>,
        (x, y): (i64, i64),
        body: &[String],
    ) -> String {
        let hat = self.add(opcode, Vec::new(), fields);
        if let Some(block) = self.blocks.get_mut(&hat) {
            block.top_level = true;
            block.x = Some(x);
            block.y = Some(y);
        }
        let mut stack = Vec::with_capacity(body.len() + 1);
        stack.push(hat.clone());
        stack.extend_from_slice(body);
        self.chain(&stack);
        hat
    }

    /// Looks up a block.
    pub fn get(&self, id: &str) -> Option<&Block> {
        self.blocks.get(id)
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns `true` if no blocks were added.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Finishes the graph.
    pub fn into_blocks(self) -> BTreeMap<String, Block> {
        self.blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_encoding() {
        let var = VarRef::new("camera-x", "v-cx");
        assert_eq!(Input::Number(-20).encode(), json!([1, [4, "-20"]]));
        assert_eq!(Input::Text("460".into()).encode(), json!([1, [10, "460"]]));
        assert_eq!(
            Input::Variable(var, Slot::Number).encode(),
            json!([3, [12, "camera-x", "v-cx"], [4, ""]])
        );
        assert_eq!(Input::Boolean("b0001".into()).encode(), json!([2, "b0001"]));
        assert_eq!(
            Input::Broadcast(BroadcastRef::new("go", "m1")).encode(),
            json!([1, [11, "go", "m1"]])
        );
    }

    #[test]
    fn test_add_sets_parent_of_inputs() {
        let mut graph = BlockGraph::new();
        let lhs = graph.add("operator_subtract", vec![("NUM1", Input::Number(1)), ("NUM2", Input::Number(2))], vec![]);
        let setter = graph.add(
            "data_setvariableto",
            vec![("VALUE", Input::Reporter(lhs.clone(), Slot::Text))],
            vec![("VARIABLE", VarRef::new("s", "v-s").field())],
        );
        assert_eq!(graph.get(&lhs).unwrap().parent.as_deref(), Some(setter.as_str()));
        assert_eq!(graph.get(&setter).unwrap().parent, None);
    }

    #[test]
    fn test_script_chains_body() {
        let mut graph = BlockGraph::new();
        let show = graph.add("looks_show", vec![], vec![]);
        let hide = graph.add("looks_hide", vec![], vec![]);
        let hat = graph.script("event_whenflagclicked", vec![], (0, 0), &[show.clone(), hide.clone()]);

        let hat_block = graph.get(&hat).unwrap();
        assert!(hat_block.top_level);
        assert_eq!(hat_block.next.as_deref(), Some(show.as_str()));
        assert_eq!(graph.get(&show).unwrap().parent.as_deref(), Some(hat.as_str()));
        assert_eq!(graph.get(&show).unwrap().next.as_deref(), Some(hide.as_str()));
        assert_eq!(graph.get(&hide).unwrap().next, None);
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn test_menu_is_shadow() {
        let mut graph = BlockGraph::new();
        let menu = graph.menu("sensing_keyoptions", "KEY_OPTION", "up arrow");
        let block = graph.get(&menu).unwrap();
        assert!(block.shadow);
        assert_eq!(block.fields["KEY_OPTION"], json!(["up arrow", null]));
    }
}
