/// WGSL shader for every scene mesh. The per-instance `params.x` selects the
/// material: 0 normal, 1 standard (environment reflections), 2 basic, 3 matcap.
pub const SCENE_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    view: mat4x4<f32>,
    camera_pos: vec4<f32>,
    ambient: vec4<f32>,
    light_pos: vec4<f32>,
    light_color: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;
@group(0) @binding(1)
var environment: texture_cube<f32>;
@group(0) @binding(2)
var linear_sampler: sampler;
@group(0) @binding(3)
var matcap: texture_2d<f32>;

const PI: f32 = 3.14159265;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct InstanceInput {
    @location(3) model_0: vec4<f32>,
    @location(4) model_1: vec4<f32>,
    @location(5) model_2: vec4<f32>,
    @location(6) model_3: vec4<f32>,
    @location(7) color: vec4<f32>,
    @location(8) params: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) view_normal: vec3<f32>,
    @location(3) view_pos: vec3<f32>,
    @location(4) color: vec4<f32>,
    @location(5) @interpolate(flat) params: vec4<f32>,
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
    // Scales are uniform, so the model matrix also transforms normals.
    let world_normal = normalize((model * vec4<f32>(vertex.normal, 0.0)).xyz);
    let view_pos = uniforms.view * world_pos;

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * world_pos;
    out.world_pos = world_pos.xyz;
    out.world_normal = world_normal;
    out.view_normal = normalize((uniforms.view * vec4<f32>(world_normal, 0.0)).xyz);
    out.view_pos = view_pos.xyz;
    out.color = instance.color;
    out.params = instance.params;
    return out;
}

fn sample_environment(dir: vec3<f32>) -> vec3<f32> {
    // Cube images follow the left-handed face convention; mirror x.
    return textureSampleLevel(environment, linear_sampler, vec3<f32>(-dir.x, dir.y, dir.z), 0.0).rgb;
}

fn distribution_ggx(n_dot_h: f32, alpha: f32) -> f32 {
    let a2 = alpha * alpha;
    let d = n_dot_h * n_dot_h * (a2 - 1.0) + 1.0;
    return a2 / (PI * d * d);
}

fn visibility_smith(n_dot_l: f32, n_dot_v: f32, alpha: f32) -> f32 {
    let a2 = alpha * alpha;
    let gv = n_dot_l * sqrt(a2 + (1.0 - a2) * n_dot_v * n_dot_v);
    let gl = n_dot_v * sqrt(a2 + (1.0 - a2) * n_dot_l * n_dot_l);
    return 0.5 / max(gv + gl, 1e-5);
}

fn fresnel_schlick(f0: vec3<f32>, v_dot_h: f32) -> vec3<f32> {
    return f0 + (vec3<f32>(1.0) - f0) * pow(1.0 - v_dot_h, 5.0);
}

fn shade_standard(in: VertexOutput, base: vec3<f32>) -> vec3<f32> {
    let metalness = clamp(in.params.y, 0.0, 1.0);
    let roughness = clamp(in.params.z, 0.0525, 1.0);
    let alpha = roughness * roughness;

    let n = normalize(in.world_normal);
    let v = normalize(uniforms.camera_pos.xyz - in.world_pos);
    let n_dot_v = max(dot(n, v), 1e-4);
    let diffuse_color = base * (1.0 - metalness);
    let f0 = mix(vec3<f32>(0.04), base, metalness);

    // Point light, inverse-square falloff.
    let to_light = uniforms.light_pos.xyz - in.world_pos;
    let distance_sq = max(dot(to_light, to_light), 0.01);
    let l = to_light * inverseSqrt(distance_sq);
    let h = normalize(l + v);
    let n_dot_l = max(dot(n, l), 0.0);
    let irradiance = uniforms.light_color.rgb * n_dot_l / distance_sq;
    let f = fresnel_schlick(f0, max(dot(v, h), 0.0));
    let specular = f * visibility_smith(n_dot_l, n_dot_v, alpha) * distribution_ggx(max(dot(n, h), 0.0), alpha);
    var color = irradiance * (diffuse_color / PI + specular);

    color += uniforms.ambient.rgb * diffuse_color / PI;

    // Environment: rougher surfaces lean toward the normal-direction sample.
    let r = reflect(-v, n);
    let env = mix(sample_environment(r), sample_environment(n), roughness);
    let env_fresnel = f0 + (max(vec3<f32>(1.0 - roughness), f0) - f0) * pow(1.0 - n_dot_v, 5.0);
    color += env * env_fresnel;
    color += sample_environment(n) * diffuse_color * 0.1;
    return color;
}

fn shade_matcap(in: VertexOutput, base: vec3<f32>) -> vec3<f32> {
    let view_dir = normalize(-in.view_pos);
    let x = normalize(vec3<f32>(view_dir.z, 0.0, -view_dir.x));
    let y = cross(view_dir, x);
    let n = normalize(in.view_normal);
    let uv = vec2<f32>(dot(x, n), dot(y, n)) * 0.495 + 0.5;
    let texel = textureSampleLevel(matcap, linear_sampler, vec2<f32>(uv.x, 1.0 - uv.y), 0.0);
    return base * texel.rgb;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let kind = u32(in.params.x + 0.5);
    var rgb: vec3<f32>;
    switch kind {
        case 0u: {
            rgb = normalize(in.view_normal) * 0.5 + 0.5;
        }
        case 1u: {
            rgb = shade_standard(in, in.color.rgb);
        }
        case 3u: {
            rgb = shade_matcap(in, in.color.rgb);
        }
        default: {
            rgb = in.color.rgb;
        }
    }
    return vec4<f32>(rgb, in.color.a);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_declares_entry_points_and_bindings() {
        assert!(SCENE_SHADER.contains("fn vs_main"));
        assert!(SCENE_SHADER.contains("fn fs_main"));
        for binding in 0..4 {
            assert!(SCENE_SHADER.contains(&format!("@binding({binding})")));
        }
    }

    #[test]
    fn textures_are_sampled_with_explicit_level() {
        // Sampling inside the material switch must not need derivatives.
        assert!(!SCENE_SHADER.contains("textureSample("));
    }
}
