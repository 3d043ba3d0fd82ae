use crate::assembly::{
    ConnectorRecord, ConnectorSet, NoProgress, OverlapParams, ParamsError, ProgressSink,
};
use crate::math::Real;
use crate::partitioning::SpatialIndex;
use crate::query::{closest_vertex_pair, overlap};
use crate::shape::{MeshSource, PolygonMesh};
use crate::transformation::{preprocess, PreprocessError};

/// Error raised while generating the connectors of a collection.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum GenerateError {
    /// The collection is itself the output of a previous generation.
    #[error("the collection `{collection}` is an overlap collection and can’t be processed.")]
    InvalidSelection {
        /// Name of the rejected collection.
        collection: String,
    },
    /// The mesh of an object couldn’t be prepared.
    #[error("failed to prepare the object `{object}`: {source}")]
    Preprocess {
        /// Name of the offending object.
        object: String,
        /// The underlying failure.
        source: PreprocessError,
    },
    /// The generation parameters are out of range.
    #[error(transparent)]
    InvalidParams(#[from] ParamsError),
}

/// The name of the collection holding the connectors generated for `collection`.
pub fn overlap_collection_name(collection: &str) -> String {
    format!("{collection}_overlaps")
}

/// Rejects collections that can’t be used as the input of a generation.
///
/// A collection whose name contains `"overlaps"` is considered to be the output of a previous
/// generation (see [`overlap_collection_name`]).
pub fn check_selection(collection: &str) -> Result<(), GenerateError> {
    if collection.contains("overlaps") {
        Err(GenerateError::InvalidSelection {
            collection: collection.to_string(),
        })
    } else {
        Ok(())
    }
}

/// An object mesh in world space, ready for overlap queries.
struct PreparedObject {
    mesh: PolygonMesh,
    index: SpatialIndex,
}

/// Generates the connectors between every overlapping pair of a sequence of objects.
///
/// The pairs `(i, j)` with `i < j` are visited in input order, so the output is fully
/// determined by the order of the objects. Each object is preprocessed and indexed the first
/// time it takes part in a pair, then reused for all its other pairs.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct StructureGenerator {
    params: OverlapParams,
}

impl StructureGenerator {
    /// Creates a generator after checking that `params` are valid.
    pub fn new(params: OverlapParams) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// The parameters of this generator.
    pub fn params(&self) -> &OverlapParams {
        &self.params
    }

    /// Generates the connectors of `objects`.
    ///
    /// See [`Self::generate_into`] for details.
    pub fn generate<S: MeshSource>(
        &self,
        objects: &[S],
        progress: &mut impl ProgressSink,
    ) -> Result<Vec<ConnectorRecord>, GenerateError> {
        let mut out = ConnectorSet::new();
        self.generate_into(objects, &mut out, progress)?;
        Ok(out.into_records())
    }

    /// Resets `out` and fills it with the connectors of `objects`.
    ///
    /// After all the pairs `(i, _)` are processed, `(i + 1) / N` is reported to `progress`,
    /// where `N` is the number of objects.
    ///
    /// If an object fails to be preprocessed, the generation stops and the connectors emitted
    /// so far are left in `out`. An empty mesh isn’t an error: it just doesn’t overlap anything.
    pub fn generate_into<S: MeshSource>(
        &self,
        objects: &[S],
        out: &mut ConnectorSet,
        progress: &mut impl ProgressSink,
    ) -> Result<(), GenerateError> {
        out.reset();

        let mut cache: Vec<Option<PreparedObject>> = objects.iter().map(|_| None).collect();

        for i in 0..objects.len() {
            for j in i + 1..objects.len() {
                self.prepare_cached(&mut cache, objects, i)?;
                self.prepare_cached(&mut cache, objects, j)?;

                if let (Some(prepared1), Some(prepared2)) = (&cache[i], &cache[j]) {
                    out.extend(connect(&objects[i], prepared1, &objects[j], prepared2));
                }
            }

            report_progress(progress, i, objects.len());
        }

        Ok(())
    }

    /// Generates the connectors of `objects`, using all the threads of the rayon pool.
    ///
    /// The result is identical to [`Self::generate`].
    #[cfg(feature = "parallel")]
    pub fn generate_par<S: MeshSource + Sync>(
        &self,
        objects: &[S],
        progress: &mut impl ProgressSink,
    ) -> Result<Vec<ConnectorRecord>, GenerateError> {
        let mut out = ConnectorSet::new();
        self.generate_par_into(objects, &mut out, progress)?;
        Ok(out.into_records())
    }

    /// Resets `out` and fills it with the connectors of `objects`, using all the threads of
    /// the rayon pool.
    ///
    /// All the objects are prepared concurrently before any pair is tested. Then the pairs
    /// `(i, _)` are tested concurrently for each `i`, and their connectors are appended in
    /// order. The connectors are thus identical to the ones of [`Self::generate_into`], and so
    /// are the progress reports.
    ///
    /// Unlike [`Self::generate_into`], an object failing to be preprocessed stops the generation
    /// before any connector is emitted. If several objects fail, any of their errors may be
    /// returned.
    #[cfg(feature = "parallel")]
    pub fn generate_par_into<S: MeshSource + Sync>(
        &self,
        objects: &[S],
        out: &mut ConnectorSet,
        progress: &mut impl ProgressSink,
    ) -> Result<(), GenerateError> {
        use rayon::prelude::*;

        out.reset();

        let prepared = objects
            .par_iter()
            .map(|object| self.prepare(object))
            .collect::<Result<Vec<_>, _>>()?;

        for i in 0..objects.len() {
            let records: Vec<_> = (i + 1..objects.len())
                .into_par_iter()
                .filter_map(|j| connect(&objects[i], &prepared[i], &objects[j], &prepared[j]))
                .collect();
            out.extend(records);

            report_progress(progress, i, objects.len());
        }

        Ok(())
    }

    fn prepare_cached<S: MeshSource>(
        &self,
        cache: &mut [Option<PreparedObject>],
        objects: &[S],
        i: usize,
    ) -> Result<(), GenerateError> {
        if cache[i].is_none() {
            cache[i] = Some(self.prepare(&objects[i])?);
        }
        Ok(())
    }

    fn prepare<S: MeshSource>(&self, object: &S) -> Result<PreparedObject, GenerateError> {
        let mesh = preprocess(
            object,
            self.params.shell_offset,
            self.params.subdivision_level,
        )
        .map_err(|source| GenerateError::Preprocess {
            object: object.name().to_string(),
            source,
        })?;

        if mesh.vertices().is_empty() || mesh.is_empty() {
            log::warn!(
                "The object `{}` has an empty mesh: it won’t be connected to anything.",
                object.name()
            );
        }

        let index = SpatialIndex::new(&mesh);
        log::debug!(
            "Prepared `{}`: {} vertices, {} faces, index depth {}.",
            object.name(),
            mesh.vertices().len(),
            mesh.faces().len(),
            index.bvh().subtree_depth(0)
        );

        Ok(PreparedObject { mesh, index })
    }
}

/// The connector between two prepared objects, if they overlap.
fn connect<S: MeshSource>(
    object1: &S,
    prepared1: &PreparedObject,
    object2: &S,
    prepared2: &PreparedObject,
) -> Option<ConnectorRecord> {
    let candidates = overlap(&prepared1.index, &prepared2.index);
    // No candidate means no overlap.
    let contact = closest_vertex_pair(&candidates, &prepared1.mesh, &prepared2.mesh)?;

    log::debug!(
        "`{}` and `{}` overlap: {} candidate face pairs, contact at {:?} (vertex distance {}).",
        object1.name(),
        object2.name(),
        candidates.len(),
        contact.point,
        contact.dist
    );

    Some(ConnectorRecord::new(
        contact.point,
        object1.name(),
        object2.name(),
    ))
}

fn report_progress(progress: &mut impl ProgressSink, i: usize, num_objects: usize) {
    let fraction = (i + 1) as Real / num_objects as Real;
    log::info!("Progress: {:.2}%", fraction * 100.0);
    progress.report(fraction);
}

/// Generates the connectors between every overlapping pair of `objects`.
///
/// This is a shortcut for [`StructureGenerator::generate`] with the default index build
/// strategy and no progress report.
pub fn generate<S: MeshSource>(
    objects: &[S],
    shell_offset: Option<Real>,
    subdivision_level: u32,
) -> Result<Vec<ConnectorRecord>, GenerateError> {
    let generator = StructureGenerator::new(OverlapParams {
        shell_offset,
        subdivision_level,
        ..Default::default()
    })?;
    generator.generate(objects, &mut NoProgress)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::{HomogeneousMatrix, Point, Vector};
    use crate::shape::MeshObject;

    fn cube(name: &str, x: Real) -> MeshObject {
        MeshObject::new(name, PolygonMesh::cuboid(Vector::repeat(0.5)))
            .with_translation(Vector::new(x + 0.5, 0.5, 0.5))
    }

    #[test]
    fn selection_and_collection_names() {
        assert_eq!(overlap_collection_name("Wall"), "Wall_overlaps");
        assert_eq!(check_selection("Wall"), Ok(()));
        assert_eq!(
            check_selection(&overlap_collection_name("Wall")),
            Err(GenerateError::InvalidSelection {
                collection: "Wall_overlaps".to_string()
            })
        );
    }

    #[test]
    fn invalid_params_are_rejected() {
        assert_eq!(
            generate(&[cube("a", 0.0)], None, 101),
            Err(GenerateError::InvalidParams(
                ParamsError::SubdivisionOutOfRange(101)
            ))
        );
    }

    #[test]
    fn progress_is_reported_once_per_object() {
        let objects = [cube("a", 0.0), cube("b", 0.5), cube("c", 5.0), cube("d", 5.5)];
        let generator = StructureGenerator::new(OverlapParams {
            subdivision_level: 0,
            ..Default::default()
        })
        .unwrap();

        let mut reports = vec![];
        let records = generator
            .generate(&objects, &mut |f: Real| reports.push(f))
            .unwrap();

        assert_eq!(reports, [0.25, 0.5, 0.75, 1.0]);
        assert_eq!(
            records.iter().map(|r| r.name()).collect::<Vec<_>>(),
            ["a_b", "c_d"]
        );

        let mut reports = vec![];
        let none: [MeshObject; 0] = [];
        assert!(generator
            .generate(&none, &mut |f: Real| reports.push(f))
            .unwrap()
            .is_empty());
        assert!(reports.is_empty());
    }

    #[test]
    fn failure_keeps_emitted_connectors() {
        let mut broken = HomogeneousMatrix::identity();
        broken[(1, 1)] = Real::NAN;
        let objects = [
            cube("a", 0.0),
            cube("b", 0.5),
            cube("c", 0.0).with_transform(broken),
        ];

        let mut out = ConnectorSet::new();
        out.push(ConnectorRecord::new(Point::origin(), "stale", "record"));

        let generator = StructureGenerator::new(OverlapParams {
            subdivision_level: 1,
            ..Default::default()
        })
        .unwrap();
        let err = generator
            .generate_into(&objects, &mut out, &mut NoProgress)
            .unwrap_err();

        assert_eq!(
            err,
            GenerateError::Preprocess {
                object: "c".to_string(),
                source: PreprocessError::NonFiniteTransform,
            }
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out.records()[0].name(), "a_b");
    }

    #[test]
    fn empty_meshes_never_overlap() {
        let objects = [
            cube("a", 0.0),
            MeshObject::new("empty", PolygonMesh::default()),
            cube("b", 0.5),
        ];
        let records = generate(&objects, Some(0.1), 2).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), "a_b");
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_generation_matches_sequential() {
        let objects: Vec<_> = (0..6)
            .map(|k| cube(&format!("cube{k}"), k as Real * 0.75))
            .collect();
        let generator = StructureGenerator::new(OverlapParams {
            subdivision_level: 2,
            ..Default::default()
        })
        .unwrap();

        let mut seq_reports = vec![];
        let mut par_reports = vec![];
        let seq = generator
            .generate(&objects, &mut |f: Real| seq_reports.push(f))
            .unwrap();
        let par = generator
            .generate_par(&objects, &mut |f: Real| par_reports.push(f))
            .unwrap();

        assert_eq!(seq, par);
        assert_eq!(seq_reports, par_reports);
        assert_eq!(seq.len(), 5);
    }
}
