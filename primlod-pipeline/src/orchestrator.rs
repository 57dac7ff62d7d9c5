//! Per-mesh pipeline orchestration
//!
//! Each source mesh moves through triangulation, decimation, and attribute
//! remapping, then is written to the output scene. A mesh that cannot
//! complete a stage is skipped with a recorded reason and processing moves
//! on; only document-level failures abort the run.

use crate::config::PipelineConfig;
use crate::scene::{SceneReader, SceneWriter};
use primlod_core::{Diagnostic, LodMesh, Result, SourceMesh};
use primlod_remap::{triangulate, RemapContext};
use primlod_simplification::DecimationOracle;

/// The stage a mesh had reached when it was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipStage {
    /// Source data was missing or malformed.
    Discovered,
    /// Triangulation produced no triangles.
    Triangulated,
    /// The decimation oracle failed or returned empty geometry.
    Simplified,
}

/// Per-mesh triangle and primvar counters for a completed mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshStats {
    pub original_points: usize,
    pub original_triangles: usize,
    pub target_triangles: usize,
    pub result_points: usize,
    pub result_triangles: usize,
    pub primvars_remapped: usize,
    pub primvars_skipped: usize,
}

/// Terminal state of one mesh.
#[derive(Debug, Clone, PartialEq)]
pub enum MeshOutcome {
    Written(MeshStats),
    Skipped { stage: SkipStage, reason: String },
}

/// One source mesh's path and terminal state.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshReport {
    pub path: String,
    pub outcome: MeshOutcome,
}

/// Aggregate result of a pipeline run. Partial success (some meshes or
/// primvars skipped) is a normal outcome, not an error.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<MeshReport>,
    pub diagnostics: Vec<Diagnostic>,
}

impl RunSummary {
    /// Number of meshes written to the output scene.
    pub fn written(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, MeshOutcome::Written(_)))
            .count()
    }

    /// Number of meshes skipped.
    pub fn skipped(&self) -> usize {
        self.reports.len() - self.written()
    }
}

struct Skip {
    stage: SkipStage,
    reason: String,
}

impl Skip {
    fn new(stage: SkipStage, reason: impl Into<String>) -> Self {
        Self {
            stage,
            reason: reason.into(),
        }
    }
}

/// Decimate every mesh in the source scene and write the results.
///
/// Returns the run summary on success; the only hard failures are
/// collaborator-level (`DocumentIo`) and invalid configuration.
pub fn decimate_scene(
    reader: &dyn SceneReader,
    writer: &mut dyn SceneWriter,
    config: &PipelineConfig,
    oracle: &dyn DecimationOracle,
) -> Result<RunSummary> {
    config.validate()?;

    let mut summary = RunSummary::default();
    for mesh in reader.meshes()? {
        match process_mesh(&mesh, config, oracle, &mut summary.diagnostics) {
            Ok((lod, stats)) => {
                writer.write_mesh(&lod)?;
                summary.reports.push(MeshReport {
                    path: mesh.path.clone(),
                    outcome: MeshOutcome::Written(stats),
                });
            }
            Err(skip) => {
                summary
                    .diagnostics
                    .push(Diagnostic::warning(&mesh.path, &skip.reason));
                summary.reports.push(MeshReport {
                    path: mesh.path.clone(),
                    outcome: MeshOutcome::Skipped {
                        stage: skip.stage,
                        reason: skip.reason,
                    },
                });
            }
        }
    }
    writer.save()?;
    Ok(summary)
}

fn process_mesh(
    mesh: &SourceMesh,
    config: &PipelineConfig,
    oracle: &dyn DecimationOracle,
    diagnostics: &mut Vec<Diagnostic>,
) -> std::result::Result<(LodMesh, MeshStats), Skip> {
    if mesh.points.is_empty() {
        return Err(Skip::new(SkipStage::Discovered, "mesh has no point data"));
    }
    if mesh.face_vertex_counts.is_empty() || mesh.face_vertex_indices.is_empty() {
        return Err(Skip::new(
            SkipStage::Discovered,
            "mesh has missing or empty face data",
        ));
    }
    if !mesh.face_data_consistent() {
        return Err(Skip::new(
            SkipStage::Discovered,
            "face counts and indices do not describe each other",
        ));
    }

    let (triangles, dropped) = triangulate(&mesh.face_vertex_counts, &mesh.face_vertex_indices);
    if !dropped.is_empty() {
        diagnostics.push(Diagnostic::info(
            &mesh.path,
            format!(
                "dropped {} degenerate face(s) during triangulation",
                dropped.len()
            ),
        ));
    }
    if triangles.is_empty() {
        return Err(Skip::new(
            SkipStage::Triangulated,
            "triangulation produced no triangles",
        ));
    }

    let target_triangles =
        ((triangles.len() as f32 * config.decimation_factor).floor() as usize).max(1);
    let decimated = match oracle.decimate(&mesh.points, &triangles, target_triangles) {
        Ok(decimated) => decimated,
        Err(err) => return Err(Skip::new(SkipStage::Simplified, err.to_string())),
    };
    if decimated.is_empty() {
        return Err(Skip::new(
            SkipStage::Simplified,
            "decimation oracle returned empty geometry",
        ));
    }

    let remapper = RemapContext::new(
        &mesh.points,
        &triangles,
        &decimated.points,
        &decimated.triangles,
    );
    let mut primvars = Vec::with_capacity(mesh.primvars.len());
    let mut primvars_skipped = 0usize;
    for primvar in &mesh.primvars {
        match remapper.remap(primvar, config.vertex_remap) {
            Ok(remapped) => primvars.push(remapped),
            Err(err) => {
                primvars_skipped += 1;
                diagnostics.push(Diagnostic::warning(
                    &mesh.path,
                    format!("skipped primvar '{}': {}", primvar.name, err),
                ));
            }
        }
    }

    let stats = MeshStats {
        original_points: mesh.points.len(),
        original_triangles: triangles.len(),
        target_triangles,
        result_points: decimated.points.len(),
        result_triangles: decimated.triangles.len(),
        primvars_remapped: primvars.len(),
        primvars_skipped,
    };

    let mut lod = LodMesh::new(mesh.path.clone(), decimated.points, decimated.triangles);
    lod.primvars = primvars;
    lod.compute_vertex_normals();
    Ok((lod, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::MemoryScene;
    use primlod_core::{Error, Interpolation, Point3, Point3f, Primvar, PrimvarValues, Triangle};
    use primlod_simplification::Decimated;
    use std::cell::Cell;

    /// Keeps all points and every other triangle; records the target it
    /// was asked for.
    struct EveryOtherOracle {
        last_target: Cell<Option<usize>>,
    }

    impl EveryOtherOracle {
        fn new() -> Self {
            Self {
                last_target: Cell::new(None),
            }
        }
    }

    impl DecimationOracle for EveryOtherOracle {
        fn decimate(
            &self,
            points: &[Point3f],
            triangles: &[Triangle],
            target_triangle_count: usize,
        ) -> primlod_core::Result<Decimated> {
            self.last_target.set(Some(target_triangle_count));
            Ok(Decimated {
                points: points.to_vec(),
                triangles: triangles.iter().copied().step_by(2).collect(),
            })
        }
    }

    struct FailingOracle;

    impl DecimationOracle for FailingOracle {
        fn decimate(
            &self,
            _points: &[Point3f],
            _triangles: &[Triangle],
            _target_triangle_count: usize,
        ) -> primlod_core::Result<Decimated> {
            Err(Error::SimplificationFailed("oracle exploded".to_string()))
        }
    }

    struct EmptyOracle;

    impl DecimationOracle for EmptyOracle {
        fn decimate(
            &self,
            _points: &[Point3f],
            _triangles: &[Triangle],
            _target_triangle_count: usize,
        ) -> primlod_core::Result<Decimated> {
            Ok(Decimated {
                points: Vec::new(),
                triangles: Vec::new(),
            })
        }
    }

    fn make_grid_mesh(path: &str, size: usize) -> SourceMesh {
        let mut mesh = SourceMesh::new(
            path,
            (0..size * size)
                .map(|i| Point3::new((i % size) as f32, (i / size) as f32, 0.0))
                .collect(),
        );
        for y in 0..(size - 1) {
            for x in 0..(size - 1) {
                let tl = y * size + x;
                mesh.face_vertex_counts.push(4);
                mesh.face_vertex_indices
                    .extend([tl, tl + 1, tl + size + 1, tl + size]);
            }
        }
        mesh
    }

    // ---- Target arithmetic tests ----

    #[test]
    fn test_oracle_receives_floored_target() {
        // 5 quads -> 10 triangles; factor 0.5 -> target 5
        let mut mesh = make_grid_mesh("/scene/grid", 6);
        mesh.face_vertex_counts.truncate(5);
        mesh.face_vertex_indices.truncate(20);

        let oracle = EveryOtherOracle::new();
        let reader = MemoryScene::with_meshes(vec![mesh]);
        let mut writer = MemoryScene::new();
        let config = PipelineConfig::new(0.5, primlod_remap::VertexRemap::Nearest);

        decimate_scene(&reader, &mut writer, &config, &oracle).unwrap();
        assert_eq!(oracle.last_target.get(), Some(5));
    }

    #[test]
    fn test_target_clamped_to_one() {
        let mut mesh = SourceMesh::new(
            "/scene/tri",
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
        );
        mesh.face_vertex_counts = vec![3];
        mesh.face_vertex_indices = vec![0, 1, 2];

        let oracle = EveryOtherOracle::new();
        let reader = MemoryScene::with_meshes(vec![mesh]);
        let mut writer = MemoryScene::new();
        let config = PipelineConfig::new(0.1, primlod_remap::VertexRemap::Nearest);

        decimate_scene(&reader, &mut writer, &config, &oracle).unwrap();
        assert_eq!(oracle.last_target.get(), Some(1));
    }

    // ---- Skip condition tests ----

    #[test]
    fn test_mesh_without_points_is_skipped() {
        let mesh = SourceMesh::new("/scene/empty", Vec::new());
        let reader = MemoryScene::with_meshes(vec![mesh]);
        let mut writer = MemoryScene::new();

        let summary = decimate_scene(
            &reader,
            &mut writer,
            &PipelineConfig::default(),
            &EveryOtherOracle::new(),
        )
        .unwrap();

        assert_eq!(summary.written(), 0);
        assert_eq!(summary.skipped(), 1);
        assert!(matches!(
            summary.reports[0].outcome,
            MeshOutcome::Skipped { stage: SkipStage::Discovered, .. }
        ));
        assert!(writer.written().is_empty());
        assert!(writer.saved());
    }

    #[test]
    fn test_mesh_with_inconsistent_faces_is_skipped() {
        let mut mesh = make_grid_mesh("/scene/grid", 3);
        mesh.face_vertex_indices.pop();
        let reader = MemoryScene::with_meshes(vec![mesh]);
        let mut writer = MemoryScene::new();

        let summary = decimate_scene(
            &reader,
            &mut writer,
            &PipelineConfig::default(),
            &EveryOtherOracle::new(),
        )
        .unwrap();
        assert_eq!(summary.skipped(), 1);
    }

    #[test]
    fn test_all_degenerate_faces_skip_at_triangulation() {
        let mut mesh = SourceMesh::new(
            "/scene/degenerate",
            vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)],
        );
        mesh.face_vertex_counts = vec![2, 2];
        mesh.face_vertex_indices = vec![0, 1, 1, 0];

        let reader = MemoryScene::with_meshes(vec![mesh]);
        let mut writer = MemoryScene::new();
        let summary = decimate_scene(
            &reader,
            &mut writer,
            &PipelineConfig::default(),
            &EveryOtherOracle::new(),
        )
        .unwrap();

        assert!(matches!(
            summary.reports[0].outcome,
            MeshOutcome::Skipped { stage: SkipStage::Triangulated, .. }
        ));
    }

    #[test]
    fn test_oracle_error_skips_mesh_and_run_continues() {
        let meshes = vec![make_grid_mesh("/scene/a", 3), make_grid_mesh("/scene/b", 3)];
        let reader = MemoryScene::with_meshes(meshes);
        let mut writer = MemoryScene::new();

        let summary = decimate_scene(
            &reader,
            &mut writer,
            &PipelineConfig::default(),
            &FailingOracle,
        )
        .unwrap();

        assert_eq!(summary.skipped(), 2);
        assert!(summary.reports.iter().all(|r| matches!(
            r.outcome,
            MeshOutcome::Skipped { stage: SkipStage::Simplified, .. }
        )));
        assert!(writer.saved());
    }

    #[test]
    fn test_empty_oracle_result_skips_mesh() {
        let reader = MemoryScene::with_meshes(vec![make_grid_mesh("/scene/a", 3)]);
        let mut writer = MemoryScene::new();

        let summary =
            decimate_scene(&reader, &mut writer, &PipelineConfig::default(), &EmptyOracle)
                .unwrap();
        assert!(matches!(
            summary.reports[0].outcome,
            MeshOutcome::Skipped { stage: SkipStage::Simplified, .. }
        ));
    }

    // ---- Written mesh tests ----

    #[test]
    fn test_written_mesh_shape_and_stats() {
        let mut mesh = make_grid_mesh("/scene/grid", 3);
        mesh.primvars.push(Primvar::new(
            "height",
            Interpolation::Vertex,
            PrimvarValues::Float((0..9).map(|i| i as f32).collect()),
        ));

        let reader = MemoryScene::with_meshes(vec![mesh]);
        let mut writer = MemoryScene::new();
        let summary = decimate_scene(
            &reader,
            &mut writer,
            &PipelineConfig::default(),
            &EveryOtherOracle::new(),
        )
        .unwrap();

        assert_eq!(summary.written(), 1);
        let written = &writer.written()[0];
        // 4 quads -> 8 triangles -> every other -> 4
        assert_eq!(written.triangle_count(), 4);
        assert_eq!(written.face_vertex_counts(), vec![3; 4]);
        assert_eq!(written.face_vertex_indices().len(), 12);
        assert_eq!(written.subdivision_scheme(), "none");
        assert!(written.normals.is_some());
        assert_eq!(written.primvars.len(), 1);

        let MeshOutcome::Written(stats) = &summary.reports[0].outcome else {
            panic!("expected written outcome");
        };
        assert_eq!(stats.original_triangles, 8);
        assert_eq!(stats.result_triangles, 4);
        assert_eq!(stats.primvars_remapped, 1);
        assert_eq!(stats.primvars_skipped, 0);
    }

    #[test]
    fn test_bad_primvar_skipped_mesh_still_written() {
        let mut mesh = make_grid_mesh("/scene/grid", 3);
        mesh.primvars.push(Primvar::new(
            "broken",
            Interpolation::Vertex,
            PrimvarValues::Float(vec![1.0, 2.0]), // 9 points expected
        ));
        mesh.primvars.push(Primvar::new(
            "ok",
            Interpolation::Constant,
            PrimvarValues::Float(vec![5.0]),
        ));

        let reader = MemoryScene::with_meshes(vec![mesh]);
        let mut writer = MemoryScene::new();
        let summary = decimate_scene(
            &reader,
            &mut writer,
            &PipelineConfig::default(),
            &EveryOtherOracle::new(),
        )
        .unwrap();

        assert_eq!(summary.written(), 1);
        let written = &writer.written()[0];
        assert_eq!(written.primvars.len(), 1);
        assert_eq!(written.primvars[0].name, "ok");
        assert!(summary
            .diagnostics
            .iter()
            .any(|d| d.message.contains("broken")));
    }

    #[test]
    fn test_invalid_config_aborts_before_any_work() {
        let reader = MemoryScene::with_meshes(vec![make_grid_mesh("/scene/grid", 3)]);
        let mut writer = MemoryScene::new();
        let config = PipelineConfig::new(0.0, primlod_remap::VertexRemap::Nearest);

        let result = decimate_scene(&reader, &mut writer, &config, &EveryOtherOracle::new());
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
        assert!(!writer.saved());
    }
}
