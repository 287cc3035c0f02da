//! Parse and validate the WGSL shaders offline with naga.

use naga::front::wgsl;
use naga::valid::{Capabilities, ValidationFlags, Validator};

const SHADERS: [(&str, &str); 3] = [
    ("water", include_str!("../src/shaders/water.wgsl")),
    ("sky", include_str!("../src/shaders/sky.wgsl")),
    ("ship", include_str!("../src/shaders/ship.wgsl")),
];

fn parse(name: &str, source: &str) -> naga::Module {
    match wgsl::parse_str(source) {
        Ok(module) => module,
        Err(e) => panic!("{} shader failed to parse:\n{}", name, e.emit_to_string(source)),
    }
}

#[test]
fn test_shaders_validate() {
    for (name, source) in SHADERS {
        let module = parse(name, source);
        let result =
            Validator::new(ValidationFlags::all(), Capabilities::all()).validate(&module);
        assert!(result.is_ok(), "{} shader failed validation: {:?}", name, result.err());
    }
}

#[test]
fn test_shaders_expose_render_entry_points() {
    for (name, source) in SHADERS {
        let module = parse(name, source);
        let find = |entry: &str| module.entry_points.iter().find(|ep| ep.name == entry);

        let vs = find("vs_main").unwrap_or_else(|| panic!("{} has no vs_main", name));
        assert_eq!(vs.stage, naga::ShaderStage::Vertex);

        let fs = find("fs_main").unwrap_or_else(|| panic!("{} has no fs_main", name));
        assert_eq!(fs.stage, naga::ShaderStage::Fragment);
    }
}

#[test]
fn test_sky_draws_without_vertex_buffers() {
    let module = parse("sky", SHADERS[1].1);
    let vs = module
        .entry_points
        .iter()
        .find(|ep| ep.name == "vs_main")
        .expect("sky vs_main");

    // Only the vertex index builtin feeds the fullscreen triangle
    assert_eq!(vs.function.arguments.len(), 1);
    assert!(matches!(
        vs.function.arguments[0].binding,
        Some(naga::Binding::BuiltIn(naga::BuiltIn::VertexIndex))
    ));
}
