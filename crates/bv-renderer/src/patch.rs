//! Box patch GPU resources and drawing
//!
//! [`GpuPatch`] owns the uploaded buffers for one patch; [`PatchRenderer`]
//! owns the pipelines and issues the partitioned draw ranges. The index
//! buffers keep the core's per-face grouping, so visibility toggles never
//! touch the GPU: they only change which ranges get drawn.

use wgpu::util::DeviceExt;

use bv_core::{BoxPatch, PartitionTable, Quad};

use crate::constants::color;
use crate::pipeline::{create_camera_bind_group, PipelineConfig};
use crate::vertex::PositionVertex;

/// Indices per quad after expansion into two triangles.
const INDICES_PER_QUAD: u32 = 6;
/// Indices per line segment.
const INDICES_PER_SEGMENT: u32 = 2;

/// Expand quads into a triangle-list index buffer.
///
/// Each quad `(a, b, c, d)` becomes triangles `(a, b, c)` and `(a, c, d)`,
/// the same diagonal split the intersection engine uses, six indices per
/// quad so the per-face partition offsets stay a fixed multiple.
pub fn expand_quads(quads: &[Quad]) -> Vec<u32> {
    let mut indices = Vec::with_capacity(quads.len() * INDICES_PER_QUAD as usize);
    for q in quads {
        indices.extend_from_slice(&[q.a, q.b, q.c, q.a, q.c, q.d]);
    }
    indices
}

/// A color uniform buffer with its bind group.
struct ColorBinding {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl ColorBinding {
    fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        rgba: [f32; 4],
        label: &str,
    ) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Color Buffer")),
            contents: bytemuck::cast_slice(&rgba),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} Color Bind Group")),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self { buffer, bind_group }
    }

    fn update(&self, queue: &wgpu::Queue, rgba: [f32; 4]) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&rgba));
    }
}

/// GPU-resident buffers for one box patch.
pub struct GpuPatch {
    vertex_buffer: wgpu::Buffer,
    line_vertex_buffer: wgpu::Buffer,
    face_index_buffer: wgpu::Buffer,
    element_index_buffer: wgpu::Buffer,
    boundary_index_buffer: wgpu::Buffer,
    face_color: ColorBinding,
    element_color: ColorBinding,
    boundary_color: ColorBinding,
}

impl GpuPatch {
    /// Upload a patch's arrays into fresh GPU buffers.
    ///
    /// Creates everything or nothing; holders guard against double upload
    /// by keeping the result in an `Option` slot (see the patch store).
    pub fn upload(device: &wgpu::Device, renderer: &PatchRenderer, patch: &BoxPatch) -> Self {
        let face_mesh = patch.face_mesh();
        let line_mesh = patch.line_mesh();

        tracing::debug!(
            vertices = face_mesh.vertices.len(),
            quads = face_mesh.quads.len(),
            line_vertices = line_mesh.vertices.len(),
            boundary_segments = line_mesh.boundary.len(),
            element_segments = line_mesh.elements.len(),
            "uploading patch buffers"
        );

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Patch Vertex Buffer"),
            contents: bytemuck::cast_slice(&face_mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let line_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Patch Line Vertex Buffer"),
            contents: bytemuck::cast_slice(&line_mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let face_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Patch Face Index Buffer"),
            contents: bytemuck::cast_slice(&expand_quads(&face_mesh.quads)),
            usage: wgpu::BufferUsages::INDEX,
        });

        let element_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Patch Element Index Buffer"),
            contents: bytemuck::cast_slice(&line_mesh.elements),
            usage: wgpu::BufferUsages::INDEX,
        });

        let boundary_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Patch Boundary Index Buffer"),
            contents: bytemuck::cast_slice(&line_mesh.boundary),
            usage: wgpu::BufferUsages::INDEX,
        });

        let layout = &renderer.color_bind_group_layout;
        let (face_rgba, line_rgba) = selection_colors(patch.selected);

        Self {
            vertex_buffer,
            line_vertex_buffer,
            face_index_buffer,
            element_index_buffer,
            boundary_index_buffer,
            face_color: ColorBinding::new(device, layout, face_rgba, "Patch Face"),
            element_color: ColorBinding::new(device, layout, line_rgba, "Patch Element"),
            boundary_color: ColorBinding::new(device, layout, color::BOUNDARY, "Patch Boundary"),
        }
    }

    /// Swap the face and element-line colors for the selection state.
    pub fn set_selected(&self, queue: &wgpu::Queue, selected: bool) {
        let (face_rgba, line_rgba) = selection_colors(selected);
        self.face_color.update(queue, face_rgba);
        self.element_color.update(queue, line_rgba);
    }
}

fn selection_colors(selected: bool) -> ([f32; 4], [f32; 4]) {
    if selected {
        (color::FACE_SELECTED, color::LINE_SELECTED)
    } else {
        (color::FACE_NORMAL, color::LINE_NORMAL)
    }
}

/// Renderer for box patches: shaded faces plus the wireframe overlay.
pub struct PatchRenderer {
    face_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    camera_bind_group: wgpu::BindGroup,
    color_bind_group_layout: wgpu::BindGroupLayout,
}

impl PatchRenderer {
    /// Creates the face and line pipelines against the viewport's camera
    /// buffer.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
    ) -> Self {
        let camera_bind_group =
            create_camera_bind_group(device, camera_bind_group_layout, camera_buffer, "Patch");

        let color_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Patch Color Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let shader = include_str!("shaders/patch.wgsl");
        let layouts = [camera_bind_group_layout, &color_bind_group_layout];

        let face_pipeline = PipelineConfig::new("Patch Face", shader, format, depth_format, &layouts)
            .with_vertex_layouts(vec![PositionVertex::layout()])
            .with_cull_mode(Some(wgpu::Face::Back))
            .build(device);

        let line_pipeline = PipelineConfig::new("Patch Line", shader, format, depth_format, &layouts)
            .with_vertex_layouts(vec![PositionVertex::layout()])
            .with_topology(wgpu::PrimitiveTopology::LineList)
            .build(device);

        Self {
            face_pipeline,
            line_pipeline,
            camera_bind_group,
            color_bind_group_layout,
        }
    }

    /// Draw one patch: shaded faces, interior grid lines, then boundary
    /// outlines, each restricted to its visibility set's ranges.
    pub fn render<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        gpu: &'a GpuPatch,
        patch: &BoxPatch,
    ) {
        let face_mesh = patch.face_mesh();
        let line_mesh = patch.line_mesh();

        render_pass.set_pipeline(&self.face_pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_bind_group(1, &gpu.face_color.bind_group, &[]);
        render_pass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
        render_pass.set_index_buffer(gpu.face_index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        draw_ranges(
            render_pass,
            &face_mesh.faces,
            patch.visible_faces,
            INDICES_PER_QUAD,
        );

        render_pass.set_pipeline(&self.line_pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_vertex_buffer(0, gpu.line_vertex_buffer.slice(..));

        render_pass.set_bind_group(1, &gpu.element_color.bind_group, &[]);
        render_pass.set_index_buffer(
            gpu.element_index_buffer.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        draw_ranges(
            render_pass,
            &line_mesh.element_lines,
            patch.visible_elements,
            INDICES_PER_SEGMENT,
        );

        render_pass.set_bind_group(1, &gpu.boundary_color.bind_group, &[]);
        render_pass.set_index_buffer(
            gpu.boundary_index_buffer.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        draw_ranges(
            render_pass,
            &line_mesh.boundaries,
            patch.visible_boundaries,
            INDICES_PER_SEGMENT,
        );
    }
}

/// Issue one indexed draw per visible element range, scaled from element
/// offsets to index offsets.
fn draw_ranges(
    render_pass: &mut wgpu::RenderPass<'_>,
    table: &PartitionTable,
    visible: bv_core::FaceSet,
    indices_per_element: u32,
) {
    for range in table.draw_ranges(visible) {
        render_pass.draw_indexed(
            range.start * indices_per_element..range.end * indices_per_element,
            0,
            0..1,
        );
    }
}
