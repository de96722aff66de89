use nalgebra::{Point3, Vector3};
use sr3d_core::render::painter_order;
use sr3d_core::{
    load_obj, parse_obj, render_frame, Color, DrawSurface, Mesh, RenderConfig, RotationState, Scene,
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Clear(Color),
    Begin,
    Vertex(f32, f32),
    End,
    Fill(Color),
    Stroke(Option<Color>),
    Weight(f32),
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
}

impl Recorder {
    fn polygons(&self) -> Vec<Vec<(f32, f32)>> {
        let mut polygons = Vec::new();
        let mut current = None;
        for call in &self.calls {
            match call {
                Call::Begin => current = Some(Vec::new()),
                Call::Vertex(x, y) => {
                    if let Some(points) = current.as_mut() {
                        points.push((*x, *y));
                    }
                }
                Call::End => polygons.extend(current.take()),
                _ => {}
            }
        }
        polygons
    }

    fn fills(&self) -> Vec<Color> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Fill(color) => Some(*color),
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for Recorder {
    fn clear(&mut self, background: Color) {
        self.calls.push(Call::Clear(background));
    }
    fn begin_polygon(&mut self) {
        self.calls.push(Call::Begin);
    }
    fn vertex(&mut self, x: f32, y: f32) {
        self.calls.push(Call::Vertex(x, y));
    }
    fn end_polygon(&mut self) {
        self.calls.push(Call::End);
    }
    fn set_fill_color(&mut self, color: Color) {
        self.calls.push(Call::Fill(color));
    }
    fn set_stroke_color(&mut self, color: Option<Color>) {
        self.calls.push(Call::Stroke(color));
    }
    fn set_stroke_weight(&mut self, weight: f32) {
        self.calls.push(Call::Weight(weight));
    }
}

/// A single triangle in the z = 0 plane whose normal faces the camera
/// once pushed out along +z.
fn facing_triangle() -> Mesh {
    let mut mesh = parse_obj("v 0 0 0\nv 0 10 0\nv 10 0 0\nf 1 2 3\n").unwrap();
    assert!(mesh.triangles()[0].normal().z < 0.0);
    mesh.position = Vector3::new(0.0, 0.0, 50.0);
    mesh
}

#[test]
fn empty_scene_renders_cleared_frame() {
    let mut scene = Scene::new();
    let config = RenderConfig::default();
    let mut surface = Recorder::default();

    let stats = render_frame(&mut scene, &config, &mut surface);

    assert_eq!(stats.meshes, 0);
    assert_eq!(stats.drawn, 0);
    assert_eq!(surface.calls, vec![Call::Clear(Color::gray(220.0))]);
}

#[test]
fn facing_triangle_is_drawn_flipped_and_lit() {
    let mut scene = Scene::new();
    scene.add(facing_triangle());
    let config = RenderConfig::default();
    let mut surface = Recorder::default();

    let stats = render_frame(&mut scene, &config, &mut surface);
    assert_eq!(stats.drawn, 1);

    // First vertex sits on the view axis: canvas center
    let polygons = surface.polygons();
    assert_eq!(polygons.len(), 1);
    assert_eq!(polygons[0].len(), 3);
    let (x, y) = polygons[0][0];
    assert!((x - 200.0).abs() < 1e-3);
    assert!((y - 200.0).abs() < 1e-3);

    // (0, 10) is above the axis, so it lands above the center on screen
    assert!(polygons[0][1].1 < 200.0);

    // Normal points straight at the light
    assert_eq!(surface.fills(), vec![Color::gray(255.0)]);
    assert!(surface
        .calls
        .contains(&Call::Stroke(Some(Color::new(237.0, 34.0, 93.0)))));
    assert!(surface.calls.contains(&Call::Weight(1.0)));
}

#[test]
fn turned_away_triangle_is_culled() {
    let mut mesh = facing_triangle();
    mesh.rotation = RotationState::new(0.0, 180.0, 0.0);

    let mut scene = Scene::new();
    scene.add(mesh);
    let mut surface = Recorder::default();
    let stats = render_frame(&mut scene, &RenderConfig::default(), &mut surface);

    assert_eq!(stats.triangles, 1);
    assert_eq!(stats.drawn, 0);
    assert!(surface.polygons().is_empty());
    assert!(!scene.meshes()[0].triangles()[0].render().visible);
}

#[test]
fn cube_draws_between_one_and_three_faces() {
    let mut cube = Mesh::cube(35.0).unwrap();
    cube.center_origin();
    cube.position = Vector3::new(0.0, 0.0, 50.0);
    cube.rotation = RotationState::new(30.0, 40.0, 0.0);

    let mut scene = Scene::new();
    scene.add(cube);
    let mut surface = Recorder::default();
    let stats = render_frame(&mut scene, &RenderConfig::default(), &mut surface);

    assert_eq!(stats.triangles, 12);
    assert!(stats.drawn >= 2 && stats.drawn <= 6, "drawn {}", stats.drawn);
    assert_eq!(surface.polygons().len(), stats.drawn);

    // Draw order follows ascending projected depth
    let mesh = &scene.meshes()[0];
    let keys: Vec<f32> = painter_order(mesh)
        .into_iter()
        .map(sr3d_core::render::depth_key)
        .collect();
    assert!(keys.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn animation_does_not_touch_authored_geometry() {
    let mut scene = Scene::new();
    scene.add(Mesh::cube(10.0).unwrap());
    let original: Vec<[Point3<f32>; 3]> = scene.meshes()[0]
        .triangles()
        .iter()
        .map(|t| *t.vertices())
        .collect();

    let config = RenderConfig::default();
    let mut surface = Recorder::default();
    for _ in 0..10 {
        for mesh in scene.meshes_mut() {
            mesh.rotation.rotate(0.6, 0.6, 0.0);
        }
        render_frame(&mut scene, &config, &mut surface);
    }

    let after: Vec<[Point3<f32>; 3]> = scene.meshes()[0]
        .triangles()
        .iter()
        .map(|t| *t.vertices())
        .collect();
    assert_eq!(original, after);
    assert!((scene.meshes()[0].rotation.x - 6.0).abs() < 1e-4);
}

#[test]
fn mesh_appears_between_frames() {
    let mut scene = Scene::new();
    let config = RenderConfig::default();
    let mut surface = Recorder::default();

    let (tx, rx) = futures::channel::oneshot::channel::<String>();
    scene.spawn_load(
        "late",
        load_obj(async move {
            rx.await
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::BrokenPipe, e))
        }),
    );

    scene.poll_loads();
    assert_eq!(render_frame(&mut scene, &config, &mut surface).meshes, 0);

    tx.send("v 0 0 0\nv 0 10 0\nv 10 0 0\nf 1 2 3\n".to_string())
        .unwrap();
    let added = scene.poll_loads();
    for mesh in &mut scene.meshes_mut()[added] {
        mesh.position.z += 50.0;
    }

    let stats = render_frame(&mut scene, &config, &mut surface);
    assert_eq!(stats.meshes, 1);
    assert_eq!(stats.drawn, 1);
}

#[test]
fn blocking_load_with_pollster() {
    let source = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nf 1 2 3\nf 2 4 3\n";
    let mesh =
        pollster::block_on(load_obj(async { Ok::<_, std::io::Error>(source.to_string()) }))
            .unwrap();
    assert_eq!(mesh.len(), 2);
}
