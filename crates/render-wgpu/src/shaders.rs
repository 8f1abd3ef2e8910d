/// WGSL shader for instanced boxes with hemispheric lighting and edge
/// outlines.
pub const CUBE_SHADER: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
    // x: top light, y: bottom light, z: environment
    lighting: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) color: vec4<f32>,
    @location(7) edge: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_normal: vec3<f32>,
    @location(1) local_position: vec3<f32>,
    @location(2) color: vec4<f32>,
    @location(3) edge: vec4<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let world_pos = model * vec4<f32>(vertex.position, 1.0);
    let world_normal = (model * vec4<f32>(vertex.normal, 0.0)).xyz;

    var out: VertexOutput;
    out.clip_position = globals.view_proj * world_pos;
    out.world_normal = normalize(world_normal);
    out.local_position = vertex.position;
    out.color = instance.color;
    out.edge = instance.edge;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    // A fragment lies on an edge when two of its local coordinates are
    // within the outline width of the box surface.
    let d = vec3<f32>(0.5) - abs(in.local_position);
    let near = step(d, vec3<f32>(in.edge.w));
    if (in.edge.w > 0.0 && near.x + near.y + near.z >= 2.0) {
        return vec4<f32>(in.edge.rgb, 1.0);
    }

    let up = 0.5 + 0.5 * in.world_normal.y;
    let lighting = globals.lighting.x * up
        + globals.lighting.y * (1.0 - up)
        + globals.lighting.z;
    return vec4<f32>(in.color.rgb * min(lighting, 1.5), in.color.a);
}
"#;
