//! Kron reduction and per-phase wire bundling.
//!
//! Both operations shrink a primitive matrix while preserving the
//! electrical behavior seen from the retained conductors. Kron reduction
//! is the index-level primitive; bundling layers the same-phase
//! row/column combination on top of it. Neither mutates its input.

use crate::errors::LineConstantsError;
use crate::line::geometry::Phase;
use crate::math::CMatrix;

/// Extracts the `rows` × `cols` submatrix of `m` in the given index order.
fn submatrix(m: &CMatrix, rows: &[usize], cols: &[usize]) -> CMatrix {
    let mut out = CMatrix::zeros(rows.len(), cols.len());
    for (r, &i) in rows.iter().enumerate() {
        for (c, &k) in cols.iter().enumerate() {
            out[(r, c)] = m[(i, k)];
        }
    }
    out
}

/// Kron-reduces `m`, keeping the `keep` indices and embedding the `embed`
/// indices: `Zaa − Zag·Zgg⁻¹·Zga`.
///
/// `keep` and `embed` must be disjoint and together cover every index of
/// the square matrix `m`; `keep` must be non-empty. An empty `embed`
/// returns the `keep`-selection of `m` unchanged. The function knows
/// nothing about phases; it operates purely on indices.
///
/// # Errors
///
/// Returns [`LineConstantsError::SingularMatrix`] when the embedded
/// sub-block `Zgg` is not invertible (e.g. a fully decoupled,
/// zero-impedance conductor group).
///
/// # Panics
///
/// Panics if the index sets overlap or do not cover `m`.
pub fn kron_reduction(
    m: &CMatrix,
    keep: &[usize],
    embed: &[usize],
) -> Result<CMatrix, LineConstantsError> {
    assert_eq!(m.nrows(), m.ncols(), "matrix must be square");
    assert!(!keep.is_empty(), "keep set must not be empty");
    let mut covered = vec![false; m.nrows()];
    for &i in keep.iter().chain(embed) {
        assert!(!covered[i], "keep and embed must be disjoint");
        covered[i] = true;
    }
    assert!(covered.iter().all(|&c| c), "keep and embed must cover the matrix");

    if embed.is_empty() {
        return Ok(submatrix(m, keep, keep));
    }

    let z_aa = submatrix(m, keep, keep);
    let z_ag = submatrix(m, keep, embed);
    let z_ga = submatrix(m, embed, keep);
    let z_gg = submatrix(m, embed, embed);

    let z_gg_inv = z_gg
        .try_inverse()
        .ok_or(LineConstantsError::SingularMatrix {
            context: "embedding conductors during Kron reduction",
        })?;

    Ok(z_aa - z_ag * z_gg_inv * z_ga)
}

/// Bundles all conductors that share a phase into one equivalent
/// conductor per phase.
///
/// Distinct phases are processed in descending numeric order (C, B, A,
/// Neutral), a deterministic tie-break. For each phase with more than one
/// conductor, the first conductor becomes the representative; the
/// representative's column and row are subtracted from the other
/// same-phase columns and rows (the algebraic expression of the bundle
/// being electrically tied), and the remaining same-phase conductors are
/// Kron-embedded. The phase vector shrinks in lock-step with the matrix.
///
/// The input matrix and phase slice are never mutated; the combination
/// happens on a private copy.
///
/// # Errors
///
/// Propagates [`LineConstantsError::SingularMatrix`] from the embedded
/// reductions.
///
/// # Panics
///
/// Panics if `phases` is not as long as the matrix side.
pub fn bundle_phases(
    primitive: &CMatrix,
    phases: &[Phase],
) -> Result<(CMatrix, Vec<Phase>), LineConstantsError> {
    assert_eq!(primitive.nrows(), primitive.ncols(), "matrix must be square");
    assert_eq!(primitive.nrows(), phases.len(), "one phase per conductor");

    let mut m = primitive.clone();
    let mut phase_vec = phases.to_vec();

    for phase in Phase::DESCENDING {
        let indices: Vec<usize> = phase_vec
            .iter()
            .enumerate()
            .filter_map(|(i, &p)| (p == phase).then_some(i))
            .collect();

        if indices.len() <= 1 {
            continue;
        }

        let representative = indices[0];
        let embed = &indices[1..];
        let mut keep = vec![representative];
        keep.extend(
            phase_vec
                .iter()
                .enumerate()
                .filter_map(|(i, &p)| (p != phase).then_some(i)),
        );

        for &k in embed {
            for r in 0..m.nrows() {
                let delta = m[(r, representative)];
                m[(r, k)] -= delta;
            }
        }
        for &k in embed {
            for c in 0..m.ncols() {
                let delta = m[(representative, c)];
                m[(k, c)] -= delta;
            }
        }

        m = kron_reduction(&m, &keep, embed)?;
        phase_vec = keep.iter().map(|&i| phase_vec[i]).collect();
    }

    Ok((m, phase_vec))
}
