//! Generated scripts: the per-tile reposition rule and the camera tick.

use crate::blocks::{BlockGraph, BroadcastRef, Input, Slot, VarRef};
use crate::CameraSetup;
use serde_json::Value;

/// Shared variables and message every script refers to.
#[derive(Debug, Clone)]
pub struct Globals {
    /// Viewport center, x.
    pub camera_x: VarRef,
    /// Viewport center, y.
    pub camera_y: VarRef,
    /// Reposition event.
    pub reposition: BroadcastRef,
}

fn set_var(graph: &mut BlockGraph, var: &VarRef, value: Input) -> String {
    graph.add(
        "data_setvariableto",
        vec![("VALUE", value)],
        vec![("VARIABLE", var.field())],
    )
}

fn change_var(graph: &mut BlockGraph, var: &VarRef, by: i64) -> String {
    graph.add(
        "data_changevariableby",
        vec![("VALUE", Input::Number(by))],
        vec![("VARIABLE", var.field())],
    )
}

fn compare(graph: &mut BlockGraph, opcode: &str, var: &VarRef, limit: i64) -> String {
    graph.add(
        opcode,
        vec![
            ("OPERAND1", Input::Variable(var.clone(), Slot::Text)),
            ("OPERAND2", Input::Text(limit.to_string())),
        ],
        Vec::new(),
    )
}

fn and(graph: &mut BlockGraph, a: String, b: String) -> String {
    graph.add(
        "operator_and",
        vec![("OPERAND1", Input::Boolean(a)), ("OPERAND2", Input::Boolean(b))],
        Vec::new(),
    )
}

/// `-stride < var < stride`
fn strictly_within(graph: &mut BlockGraph, var: &VarRef, stride: i64) -> String {
    let above = compare(graph, "operator_gt", var, -stride);
    let below = compare(graph, "operator_lt", var, stride);
    and(graph, above, below)
}

fn if_then(graph: &mut BlockGraph, condition: String, body: &[String]) -> String {
    let mut inputs = vec![("CONDITION", Input::Boolean(condition))];
    if let Some(first) = graph.chain(body) {
        inputs.push(("SUBSTACK", Input::Substack(first)));
    }
    graph.add("control_if", inputs, Vec::new())
}

fn broadcast_and_wait(graph: &mut BlockGraph, message: &BroadcastRef) -> String {
    graph.add(
        "event_broadcastandwait",
        vec![("BROADCAST_INPUT", Input::Broadcast(message.clone()))],
        Vec::new(),
    )
}

fn key_pressed(graph: &mut BlockGraph, key: &str) -> String {
    let menu = graph.menu("sensing_keyoptions", "KEY_OPTION", key);
    graph.add("sensing_keypressed", vec![("KEY_OPTION", Input::Menu(menu))], Vec::new())
}

/// Builds the reposition script of one tile centered at world (u0, v0).
///
/// ```text
/// when I receive [reposition-map-tiles]
/// set s to (u0 - camera-x)
/// set t to (v0 - camera-y)
/// if <(-stride_u < s < stride_u) and (-stride_v < t < stride_v)> then
///     go to x: (s) y: (t)
///     show
/// else
///     hide
/// ```
pub fn tile_script(
    graph: &mut BlockGraph,
    globals: &Globals,
    s: &VarRef,
    t: &VarRef,
    (u0, v0): (i64, i64),
    (stride_u, stride_v): (i64, i64),
) -> String {
    let du = graph.add(
        "operator_subtract",
        vec![
            ("NUM1", Input::Number(u0)),
            ("NUM2", Input::Variable(globals.camera_x.clone(), Slot::Number)),
        ],
        Vec::new(),
    );
    let set_s = set_var(graph, s, Input::Reporter(du, Slot::Text));

    let dv = graph.add(
        "operator_subtract",
        vec![
            ("NUM1", Input::Number(v0)),
            ("NUM2", Input::Variable(globals.camera_y.clone(), Slot::Number)),
        ],
        Vec::new(),
    );
    let set_t = set_var(graph, t, Input::Reporter(dv, Slot::Text));

    let in_u = strictly_within(graph, s, stride_u);
    let in_v = strictly_within(graph, t, stride_v);
    let visible = and(graph, in_u, in_v);

    let go_to = graph.add(
        "motion_gotoxy",
        vec![
            ("X", Input::Variable(s.clone(), Slot::Number)),
            ("Y", Input::Variable(t.clone(), Slot::Number)),
        ],
        Vec::new(),
    );
    let show = graph.add("looks_show", Vec::new(), Vec::new());
    let hide = graph.add("looks_hide", Vec::new(), Vec::new());
    let shown_branch = graph.chain(&[go_to, show]).unwrap_or_default();

    let branch = graph.add(
        "control_if_else",
        vec![
            ("CONDITION", Input::Boolean(visible)),
            ("SUBSTACK", Input::Substack(shown_branch)),
            ("SUBSTACK2", Input::Substack(hide)),
        ],
        Vec::new(),
    );

    graph.script(
        "event_whenbroadcastreceived",
        vec![("BROADCAST_OPTION", globals.reposition.field())],
        (0, 0),
        &[set_s, set_t, branch],
    )
}

/// Builds the camera script.
///
/// ```text
/// when green flag clicked
/// set camera-x to start_x
/// set camera-y to start_y
/// go to x: 0 y: 0
/// broadcast [reposition-map-tiles] and wait
/// forever
///     if <key right arrow pressed?> then change camera-x by speed
///     ... left / up / down ...
///     clamp camera-x, camera-y into bounds
///     broadcast [reposition-map-tiles] and wait
/// ```
pub fn camera_script(graph: &mut BlockGraph, globals: &Globals, camera: &CameraSetup, speed: i64) -> String {
    let init_x = set_var(graph, &globals.camera_x, Input::Text(camera.start_x.to_string()));
    let init_y = set_var(graph, &globals.camera_y, Input::Text(camera.start_y.to_string()));
    let center = graph.add(
        "motion_gotoxy",
        vec![("X", Input::Number(0)), ("Y", Input::Number(0))],
        Vec::new(),
    );
    let first_reposition = broadcast_and_wait(graph, &globals.reposition);

    let mut tick = Vec::new();
    for (key, var, by) in [
        ("right arrow", &globals.camera_x, speed),
        ("left arrow", &globals.camera_x, -speed),
        ("up arrow", &globals.camera_y, speed),
        ("down arrow", &globals.camera_y, -speed),
    ] {
        let pressed = key_pressed(graph, key);
        let step = change_var(graph, var, by);
        tick.push(if_then(graph, pressed, &[step]));
    }

    for (var, min, max) in [
        (&globals.camera_x, camera.min_x, camera.max_x),
        (&globals.camera_y, camera.min_y, camera.max_y),
    ] {
        let too_low = compare(graph, "operator_lt", var, min);
        let floor = set_var(graph, var, Input::Text(min.to_string()));
        tick.push(if_then(graph, too_low, &[floor]));

        let too_high = compare(graph, "operator_gt", var, max);
        let ceiling = set_var(graph, var, Input::Text(max.to_string()));
        tick.push(if_then(graph, too_high, &[ceiling]));
    }
    tick.push(broadcast_and_wait(graph, &globals.reposition));

    let body = graph.chain(&tick).unwrap_or_default();
    let forever = graph.add("control_forever", vec![("SUBSTACK", Input::Substack(body))], Vec::new());

    graph.script(
        "event_whenflagclicked",
        Vec::<(&str, Value)>::new(),
        (0, 0),
        &[init_x, init_y, center, first_reposition, forever],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn globals() -> Globals {
        Globals {
            camera_x: VarRef::new("camera-x", "cx"),
            camera_y: VarRef::new("camera-y", "cy"),
            reposition: BroadcastRef::new("reposition-map-tiles", "msg"),
        }
    }

    fn opcodes(graph: &BlockGraph, mut id: Option<String>) -> Vec<String> {
        let mut out = Vec::new();
        while let Some(current) = id {
            let block = graph.get(&current).unwrap();
            out.push(block.opcode.clone());
            id = block.next.clone();
        }
        out
    }

    #[test]
    fn test_tile_script_shape() {
        let mut graph = BlockGraph::new();
        let s = VarRef::new("s", "s-id");
        let t = VarRef::new("t", "t-id");
        let hat = tile_script(&mut graph, &globals(), &s, &t, (700, 180), (460, 340));

        assert_eq!(
            opcodes(&graph, Some(hat.clone())),
            vec![
                "event_whenbroadcastreceived",
                "data_setvariableto",
                "data_setvariableto",
                "control_if_else"
            ]
        );
        // Every non-hat block has a parent.
        let blocks = graph.into_blocks();
        for (id, block) in &blocks {
            assert_eq!(block.parent.is_none(), *id == hat, "{} {}", id, block.opcode);
        }
        let limits: Vec<_> = blocks
            .values()
            .filter(|b| b.opcode == "operator_gt" || b.opcode == "operator_lt")
            .map(|b| b.inputs["OPERAND2"][1][1].as_str().unwrap().to_string())
            .collect();
        assert_eq!(limits.len(), 4);
        for limit in ["-460", "460", "-340", "340"] {
            assert!(limits.iter().any(|l| l == limit), "missing {}", limit);
        }
    }

    #[test]
    fn test_camera_script_shape() {
        let mut graph = BlockGraph::new();
        let camera = CameraSetup {
            min_x: 240,
            max_x: 700,
            min_y: 180,
            max_y: 520,
            start_x: 470,
            start_y: 350,
        };
        let hat = camera_script(&mut graph, &globals(), &camera, 10);
        assert_eq!(
            opcodes(&graph, Some(hat)),
            vec![
                "event_whenflagclicked",
                "data_setvariableto",
                "data_setvariableto",
                "motion_gotoxy",
                "event_broadcastandwait",
                "control_forever"
            ]
        );
        let blocks = graph.into_blocks();
        let keys = blocks.values().filter(|b| b.opcode == "sensing_keyoptions").count();
        assert_eq!(keys, 4);
        let waits = blocks.values().filter(|b| b.opcode == "event_broadcastandwait").count();
        assert_eq!(waits, 2);
    }
}
