use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Document, HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlProgram, WebGlShader,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::config::LookConfig;
use crate::error::PageError;
use crate::geometry::{particle_cloud, WireSphere};
use crate::scene::{Frame, Renderer, SceneDriver};

const VERTEX_SHADER: &str = r#"#version 300 es
layout(location = 0) in vec3 a_position;
uniform mat4 u_model_view;
uniform mat4 u_projection;
uniform float u_point_scale;
void main() {
    vec4 mv = u_model_view * vec4(a_position, 1.0);
    gl_PointSize = u_point_scale / -mv.z;
    gl_Position = u_projection * mv;
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 300 es
precision mediump float;
uniform vec4 u_color;
out vec4 out_color;
void main() {
    out_color = u_color;
}
"#;

/// Create the render canvas inside the mount point.
pub fn mount(document: &Document, mount_id: &str) -> Result<HtmlCanvasElement, PageError> {
    let container = document
        .get_element_by_id(mount_id)
        .ok_or_else(|| PageError::MissingElement(format!("#{mount_id}")))?;
    let canvas = document
        .create_element("canvas")
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().map_err(JsValue::from))
        .map_err(js_error)?;
    container.append_child(&canvas).map_err(js_error)?;
    Ok(canvas)
}

pub fn js_error(err: JsValue) -> PageError {
    PageError::Js(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

struct Mesh {
    vao: WebGlVertexArrayObject,
    mode: u32,
    count: i32,
    color: [f32; 4],
}

struct Uniforms {
    model_view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    point_scale: Option<WebGlUniformLocation>,
    color: Option<WebGlUniformLocation>,
}

/// WebGL2 drawing of the wire sphere and the particle cloud.
pub struct GlRenderer {
    canvas: HtmlCanvasElement,
    gl: GL,
    program: WebGlProgram,
    uniforms: Uniforms,
    sphere: Mesh,
    particles: Mesh,
    particle_size: f32,
    height: u32,
}

impl GlRenderer {
    pub fn new(canvas: HtmlCanvasElement, look: &LookConfig) -> Result<Self, JsValue> {
        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &"alpha".into(), &JsValue::TRUE)?;
        js_sys::Reflect::set(&options, &"antialias".into(), &JsValue::TRUE)?;
        let gl: GL = canvas
            .get_context_with_context_options("webgl2", &options)?
            .ok_or("WebGL2 not supported")?
            .dyn_into()?;

        let program = link_program(
            &gl,
            &compile_shader(&gl, GL::VERTEX_SHADER, VERTEX_SHADER)?,
            &compile_shader(&gl, GL::FRAGMENT_SHADER, FRAGMENT_SHADER)?,
        )?;
        let uniforms = Uniforms {
            model_view: gl.get_uniform_location(&program, "u_model_view"),
            projection: gl.get_uniform_location(&program, "u_projection"),
            point_scale: gl.get_uniform_location(&program, "u_point_scale"),
            color: gl.get_uniform_location(&program, "u_color"),
        };

        let sphere = WireSphere::new(look.sphere_radius).line_positions();
        let sphere = upload(&gl, &sphere, GL::LINES, look.sphere_color)?;
        let cloud = particle_cloud(look.particle_count, look.particle_spread, || {
            js_sys::Math::random() as f32
        });
        let particles = upload(&gl, &cloud, GL::POINTS, look.particle_color)?;

        gl.enable(GL::BLEND);
        // Premultiplied output for the transparent canvas.
        gl.blend_func_separate(
            GL::SRC_ALPHA,
            GL::ONE_MINUS_SRC_ALPHA,
            GL::ONE,
            GL::ONE_MINUS_SRC_ALPHA,
        );

        Ok(Self {
            canvas,
            gl,
            program,
            uniforms,
            sphere,
            particles,
            particle_size: look.particle_size,
            height: 1,
        })
    }

    fn draw(&self, mesh: &Mesh, model_view: glam::Mat4) {
        let gl = &self.gl;
        gl.uniform_matrix4fv_with_f32_array(
            self.uniforms.model_view.as_ref(),
            false,
            &model_view.to_cols_array(),
        );
        gl.uniform4fv_with_f32_array(self.uniforms.color.as_ref(), &mesh.color);
        gl.bind_vertex_array(Some(&mesh.vao));
        gl.draw_arrays(mesh.mode, 0, mesh.count);
    }
}

impl Renderer for GlRenderer {
    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{width}px"));
        let _ = style.set_property("height", &format!("{height}px"));
        self.height = height.max(1);
    }

    fn render(&mut self, frame: &Frame) {
        let gl = &self.gl;
        gl.viewport(0, 0, self.canvas.width() as i32, self.canvas.height() as i32);
        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        gl.clear(GL::COLOR_BUFFER_BIT);

        gl.use_program(Some(&self.program));
        gl.uniform_matrix4fv_with_f32_array(
            self.uniforms.projection.as_ref(),
            false,
            &frame.projection.to_cols_array(),
        );
        // World-space size to pixels, attenuated by depth in the shader.
        gl.uniform1f(
            self.uniforms.point_scale.as_ref(),
            self.particle_size * self.height as f32 * 0.5,
        );

        self.draw(&self.sphere, frame.view * frame.sphere_model);
        self.draw(&self.particles, frame.view * frame.particles_model);
        self.gl.bind_vertex_array(None);
    }
}

fn upload(gl: &GL, positions: &[f32], mode: u32, color: [f32; 4]) -> Result<Mesh, JsValue> {
    let vao = gl.create_vertex_array().ok_or("create_vertex_array failed")?;
    gl.bind_vertex_array(Some(&vao));

    let buffer = gl.create_buffer().ok_or("create_buffer failed")?;
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
    let data = js_sys::Float32Array::from(positions);
    gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &data, GL::STATIC_DRAW);
    gl.enable_vertex_attrib_array(0);
    gl.vertex_attrib_pointer_with_i32(0, 3, GL::FLOAT, false, 0, 0);

    gl.bind_vertex_array(None);
    Ok(Mesh {
        vao,
        mode,
        count: (positions.len() / 3) as i32,
        color,
    })
}

fn compile_shader(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader, JsValue> {
    let shader = gl.create_shader(kind).ok_or("create_shader failed")?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        Err(gl
            .get_shader_info_log(&shader)
            .unwrap_or_else(|| "unknown shader error".into())
            .into())
    }
}

fn link_program(
    gl: &GL,
    vertex: &WebGlShader,
    fragment: &WebGlShader,
) -> Result<WebGlProgram, JsValue> {
    let program = gl.create_program().ok_or("create_program failed")?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.link_program(&program);
    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        Err(gl
            .get_program_info_log(&program)
            .unwrap_or_else(|| "unknown link error".into())
            .into())
    }
}

/// Start the render loop. It reschedules itself every frame and never stops.
pub fn start<R: Renderer + 'static>(driver: Rc<RefCell<SceneDriver<R>>>) -> Result<(), JsValue> {
    // `f` holds the animation-frame closure so that we can keep calling
    // `request_animation_frame` recursively. Storing it inside an `Option`
    // allows us to create the `Closure` first and then obtain a reference to
    // it from within itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        driver.borrow_mut().frame();

        // schedule next
        let next = f.borrow();
        if let (Some(window), Some(next)) = (window(), next.as_ref()) {
            if let Err(err) = window.request_animation_frame(next.as_ref().unchecked_ref()) {
                log::error!("render loop stopped: {err:?}");
            }
        }
    }) as Box<dyn FnMut()>));

    let first = g.borrow();
    let first = first.as_ref().ok_or("render loop not set")?;
    window()
        .ok_or("no window")?
        .request_animation_frame(first.as_ref().unchecked_ref())?;
    Ok(())
}
