/// Maquette Web - WebGL2 renderer for the 2D smiley scene
///
/// Draws the scene from an owned `Scene` value every frame. Shape
/// positions are in canvas pixels; the vertex shader maps them to clip
/// space through `u_resolution` and the column-major `u_transforms`
/// matrix built by the core transform library.
use maquette_core::{Scene, Shape, Transform2};
use nalgebra::{Matrix3, Point2};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    WebGl2RenderingContext as Gl, WebGlProgram, WebGlShader, WebGlUniformLocation,
    WebGlVertexArrayObject,
};

const VERTEX_SHADER: &str = r#"#version 300 es
in vec2 a_position;
uniform vec2 u_resolution;
uniform mat3 u_transforms;

void main() {
    vec2 position = (u_transforms * vec3(a_position, 1)).xy;
    vec2 zeroToOne = position / u_resolution;
    vec2 clipSpace = zeroToOne * 2.0 - 1.0;
    gl_Position = vec4(clipSpace * vec2(1, -1), 0, 1);
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;
uniform vec4 u_color;
out vec4 outColor;
void main() {
    outColor = u_color;
}
"#;

const FACE_COLOR: [f32; 4] = [1.0, 0.85, 0.0, 1.0];
const EYE_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
const MOUTH_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const PIVOT_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

/// A shape uploaded to the GPU: its vertex array object and index count.
struct Part {
    vao: WebGlVertexArrayObject,
    index_count: i32,
}

/// Renders the smiley scene onto a canvas.
#[wasm_bindgen]
pub struct SceneRenderer {
    gl: Gl,
    program: WebGlProgram,
    u_resolution: WebGlUniformLocation,
    u_transforms: WebGlUniformLocation,
    u_color: WebGlUniformLocation,
    face: Part,
    eye: Part,
    mouth: Part,
    pivot: Part,
    scene: Scene,
}

#[wasm_bindgen]
impl SceneRenderer {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<SceneRenderer, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str("canvas element not found"))?
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str("element is not a canvas"))?;
        let gl = canvas
            .get_context("webgl2")?
            .ok_or_else(|| JsValue::from_str("WebGL2 is not supported"))?
            .dyn_into::<Gl>()
            .map_err(|_| JsValue::from_str("failed to get a WebGL2 context"))?;

        let program = link_program(&gl, VERTEX_SHADER, FRAGMENT_SHADER)?;
        let u_resolution = uniform_location(&gl, &program, "u_resolution")?;
        let u_transforms = uniform_location(&gl, &program, "u_transforms")?;
        let u_color = uniform_location(&gl, &program, "u_color")?;

        let face = upload_shape(&gl, &program, &Shape::smiley())?;
        let eye = upload_shape(&gl, &program, &Shape::eye())?;
        let mouth = upload_shape(&gl, &program, &Shape::mouth())?;
        let pivot = upload_shape(&gl, &program, &Shape::pivot_marker())?;

        Ok(SceneRenderer {
            gl,
            program,
            u_resolution,
            u_transforms,
            u_color,
            face,
            eye,
            mouth,
            pivot,
            scene: Scene::new(),
        })
    }

    /// Draw one frame of the current scene.
    pub fn render(&self) {
        let gl = &self.gl;
        let width = gl.drawing_buffer_width();
        let height = gl.drawing_buffer_height();

        gl.viewport(0, 0, width, height);
        gl.clear_color(1.0, 1.0, 1.0, 1.0);
        gl.clear(Gl::COLOR_BUFFER_BIT);

        gl.use_program(Some(&self.program));
        gl.uniform2f(Some(&self.u_resolution), width as f32, height as f32);

        self.draw_part(&self.face, &self.scene.face_matrix(), FACE_COLOR);
        self.draw_part(
            &self.mouth,
            &self.scene.part_matrix(&self.scene.mouth_offset),
            MOUTH_COLOR,
        );
        self.draw_part(
            &self.eye,
            &self.scene.part_matrix(&self.scene.left_eye_offset),
            EYE_COLOR,
        );
        self.draw_part(
            &self.eye,
            &self.scene.part_matrix(&self.scene.right_eye_offset),
            EYE_COLOR,
        );
        self.draw_part(&self.pivot, &self.scene.pivot_matrix(), PIVOT_COLOR);
    }

    /// Move the face.
    pub fn set_face_position(&mut self, x: f32, y: f32) {
        self.scene.face.x = x;
        self.scene.face.y = y;
    }

    /// Rotate the face about the pivot (radians).
    pub fn set_face_rotation(&mut self, rot: f32) {
        self.scene.face.rot = rot;
    }

    /// Scale the face uniformly.
    pub fn set_face_scale(&mut self, scale: f32) {
        self.scene.face.scale = scale;
    }

    /// Move the rotation pivot.
    pub fn set_pivot(&mut self, x: f32, y: f32) {
        self.scene.pivot = Point2::new(x, y);
    }

    fn draw_part(&self, part: &Part, matrix: &Matrix3<f32>, color: [f32; 4]) {
        let gl = &self.gl;
        gl.bind_vertex_array(Some(&part.vao));
        gl.uniform_matrix3fv_with_f32_array(
            Some(&self.u_transforms),
            false,
            &Transform2::to_uniform(matrix),
        );
        gl.uniform4f(Some(&self.u_color), color[0], color[1], color[2], color[3]);
        gl.draw_elements_with_i32(Gl::TRIANGLES, part.index_count, Gl::UNSIGNED_SHORT, 0);
    }
}

fn compile_shader(gl: &Gl, kind: u32, source: &str) -> Result<WebGlShader, JsValue> {
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| JsValue::from_str("failed to create shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        Err(JsValue::from_str(&format!("shader compile error: {log}")))
    }
}

fn link_program(gl: &Gl, vertex_src: &str, fragment_src: &str) -> Result<WebGlProgram, JsValue> {
    let vertex = compile_shader(gl, Gl::VERTEX_SHADER, vertex_src)?;
    let fragment = compile_shader(gl, Gl::FRAGMENT_SHADER, fragment_src)?;

    let program = gl
        .create_program()
        .ok_or_else(|| JsValue::from_str("failed to create program"))?;
    gl.attach_shader(&program, &vertex);
    gl.attach_shader(&program, &fragment);
    gl.link_program(&program);

    if gl
        .get_program_parameter(&program, Gl::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        Err(JsValue::from_str(&format!("program link error: {log}")))
    }
}

fn uniform_location(
    gl: &Gl,
    program: &WebGlProgram,
    name: &str,
) -> Result<WebGlUniformLocation, JsValue> {
    gl.get_uniform_location(program, name)
        .ok_or_else(|| JsValue::from_str(&format!("uniform {name} not found")))
}

/// Upload a shape's positions and indices into a fresh vertex array
/// object.
fn upload_shape(gl: &Gl, program: &WebGlProgram, shape: &Shape) -> Result<Part, JsValue> {
    let vao = gl
        .create_vertex_array()
        .ok_or_else(|| JsValue::from_str("failed to create vertex array"))?;
    gl.bind_vertex_array(Some(&vao));

    let vertex_buffer = gl
        .create_buffer()
        .ok_or_else(|| JsValue::from_str("failed to create vertex buffer"))?;
    gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&vertex_buffer));
    let positions = shape.position_data();
    // SAFETY: the view is uploaded before any further allocation can
    // move the backing memory.
    unsafe {
        let view = js_sys::Float32Array::view(&positions);
        gl.buffer_data_with_array_buffer_view(Gl::ARRAY_BUFFER, &view, Gl::STATIC_DRAW);
    }

    let location = gl.get_attrib_location(program, "a_position");
    if location < 0 {
        return Err(JsValue::from_str("attribute a_position not found"));
    }
    gl.enable_vertex_attrib_array(location as u32);
    gl.vertex_attrib_pointer_with_i32(location as u32, 2, Gl::FLOAT, false, 0, 0);

    let index_buffer = gl
        .create_buffer()
        .ok_or_else(|| JsValue::from_str("failed to create index buffer"))?;
    gl.bind_buffer(Gl::ELEMENT_ARRAY_BUFFER, Some(&index_buffer));
    unsafe {
        let view = js_sys::Uint16Array::view(&shape.indices);
        gl.buffer_data_with_array_buffer_view(Gl::ELEMENT_ARRAY_BUFFER, &view, Gl::STATIC_DRAW);
    }

    gl.bind_vertex_array(None);

    Ok(Part {
        vao,
        index_count: shape.index_count(),
    })
}

#[wasm_bindgen(start)]
pub fn start() {
    // Readable panic messages in the browser console
    console_error_panic_hook::set_once();
}
