use bevy::{
    core_pipeline::{
        core_3d::graph::{Core3d, Node3d},
        fullscreen_vertex_shader::fullscreen_shader_vertex_state,
    },
    ecs::query::QueryItem,
    prelude::*,
    render::{
        RenderApp,
        extract_component::{
            ComponentUniforms, DynamicUniformIndex, ExtractComponent, ExtractComponentPlugin,
            UniformComponentPlugin,
        },
        render_graph::{
            NodeRunError, RenderGraphApp, RenderGraphContext, RenderLabel, ViewNode, ViewNodeRunner,
        },
        render_resource::{
            binding_types::{sampler, texture_2d, uniform_buffer},
            *,
        },
        renderer::{RenderContext, RenderDevice},
        view::ViewTarget,
    },
};

use crate::engine::scene::controller::Viewport;

const COLOR_SHIFT_SHADER_PATH: &str = "shaders/color_shift.wgsl";

/// Full-screen RGB split applied after tonemapping.
pub struct ColorShiftPlugin;

impl Plugin for ColorShiftPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            ExtractComponentPlugin::<ColorShiftSettings>::default(),
            UniformComponentPlugin::<ColorShiftSettings>::default(),
        ));

        let Some(render_app) = app.get_sub_app_mut(RenderApp) else {
            return;
        };

        render_app
            .add_render_graph_node::<ViewNodeRunner<ColorShiftNode>>(Core3d, ColorShiftLabel)
            .add_render_graph_edges(
                Core3d,
                (
                    Node3d::Tonemapping,
                    ColorShiftLabel,
                    Node3d::EndMainPassPostProcessing,
                ),
            );
    }

    fn finish(&self, app: &mut App) {
        let Some(render_app) = app.get_sub_app_mut(RenderApp) else {
            return;
        };

        render_app.init_resource::<ColorShiftPipeline>();
    }
}

#[derive(Debug, Hash, PartialEq, Eq, Clone, RenderLabel)]
struct ColorShiftLabel;

/// Per-camera uniform for the colour shift pass.
///
/// Red is read at `uv + offset` and blue at `uv - offset`, where the offset is
/// `amount` UV units along `angle`. `resolution` tracks the render target size.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, ExtractComponent, ShaderType)]
pub struct ColorShiftSettings {
    pub amount: f32,
    pub angle: f32,
    pub resolution: Vec2,
}

impl ColorShiftSettings {
    pub fn new(amount: f32, angle: f32, viewport: Viewport) -> Self {
        Self {
            amount,
            angle,
            resolution: viewport.size(),
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.resolution = viewport.size();
    }

    /// UV offset of the red channel; blue uses the negation. Mirrors the fragment shader.
    pub fn offset(&self) -> Vec2 {
        self.amount * Vec2::from_angle(self.angle)
    }
}

#[derive(Default)]
struct ColorShiftNode;

impl ViewNode for ColorShiftNode {
    // Extraction only adds the uniform index to cameras carrying ColorShiftSettings
    type ViewQuery = (
        &'static ViewTarget,
        &'static DynamicUniformIndex<ColorShiftSettings>,
    );

    fn run(
        &self,
        _graph: &mut RenderGraphContext,
        render_context: &mut RenderContext,
        (view_target, settings_index): QueryItem<Self::ViewQuery>,
        world: &World,
    ) -> Result<(), NodeRunError> {
        let color_shift = world.resource::<ColorShiftPipeline>();
        let Some(pipeline) = world
            .resource::<PipelineCache>()
            .get_render_pipeline(color_shift.pipeline_id)
        else {
            return Ok(());
        };
        let Some(settings) = world
            .resource::<ComponentUniforms<ColorShiftSettings>>()
            .uniforms()
            .binding()
        else {
            return Ok(());
        };

        let post_process = view_target.post_process_write();
        let bind_group = color_shift.bind_group(
            render_context.render_device(),
            post_process.source,
            settings,
        );

        let mut render_pass = render_context.begin_tracked_render_pass(RenderPassDescriptor {
            label: Some("color_shift_pass"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: post_process.destination,
                resolve_target: None,
                ops: Operations::default(),
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        render_pass.set_render_pipeline(pipeline);
        render_pass.set_bind_group(0, &bind_group, &[settings_index.index()]);
        render_pass.draw(0..3, 0..1);

        Ok(())
    }
}

#[derive(Resource)]
struct ColorShiftPipeline {
    layout: BindGroupLayout,
    sampler: Sampler,
    pipeline_id: CachedRenderPipelineId,
}

impl ColorShiftPipeline {
    fn bind_group(
        &self,
        render_device: &RenderDevice,
        source: &TextureView,
        settings: BindingResource,
    ) -> BindGroup {
        render_device.create_bind_group(
            "color_shift_bind_group",
            &self.layout,
            &BindGroupEntries::sequential((source, &self.sampler, settings)),
        )
    }
}

impl FromWorld for ColorShiftPipeline {
    fn from_world(world: &mut World) -> Self {
        let render_device = world.resource::<RenderDevice>();
        let layout = render_device.create_bind_group_layout(
            "color_shift_bind_group_layout",
            &BindGroupLayoutEntries::sequential(
                ShaderStages::FRAGMENT,
                (
                    texture_2d(TextureSampleType::Float { filterable: true }),
                    sampler(SamplerBindingType::Filtering),
                    uniform_buffer::<ColorShiftSettings>(true),
                ),
            ),
        );

        // Offset reads land between texels, so filter them
        let sampler = render_device.create_sampler(&SamplerDescriptor {
            mag_filter: FilterMode::Linear,
            min_filter: FilterMode::Linear,
            address_mode_u: AddressMode::ClampToEdge,
            address_mode_v: AddressMode::ClampToEdge,
            ..default()
        });

        let shader = world.load_asset(COLOR_SHIFT_SHADER_PATH);
        let descriptor = color_shift_pipeline_descriptor(layout.clone(), shader);
        let pipeline_id = world
            .resource_mut::<PipelineCache>()
            .queue_render_pipeline(descriptor);

        Self {
            layout,
            sampler,
            pipeline_id,
        }
    }
}

fn color_shift_pipeline_descriptor(
    layout: BindGroupLayout,
    shader: Handle<Shader>,
) -> RenderPipelineDescriptor {
    RenderPipelineDescriptor {
        label: Some("color_shift_pipeline".into()),
        layout: vec![layout],
        vertex: fullscreen_shader_vertex_state(),
        fragment: Some(FragmentState {
            shader,
            shader_defs: vec![],
            entry_point: "fragment".into(),
            targets: vec![Some(ColorTargetState {
                format: TextureFormat::bevy_default(),
                blend: None,
                write_mask: ColorWrites::ALL,
            })],
        }),
        primitive: PrimitiveState::default(),
        depth_stencil: None,
        multisample: MultisampleState::default(),
        push_constant_ranges: vec![],
        zero_initialize_workgroup_memory: false,
    }
}
