//! Assembly-time checks shared by compartments, connections and the builder.

use fl_core::{Real, ensure_finite};
use fl_geom::{Vec2, is_convex_clockwise};

use crate::connection::OpeningRect;
use crate::error::{VesselError, VesselResult};

/// Corners must be finite, keep the top pair above the bottom pair and wind
/// clockwise around a strictly convex quadrilateral.
pub(crate) fn validate_corners(name: &str, corners: &[Vec2; 4]) -> VesselResult<()> {
    let invalid = |reason| VesselError::InvalidGeometry {
        name: name.to_string(),
        reason,
    };

    if corners.iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
        return Err(invalid("corner coordinates must be finite"));
    }
    let [tl, tr, br, bl] = corners;
    if tl.y < bl.y || tr.y < br.y {
        return Err(invalid("top corners must not sit below bottom corners"));
    }
    if !is_convex_clockwise(corners) {
        return Err(invalid("corners must form a clockwise convex quadrilateral"));
    }
    Ok(())
}

pub(crate) fn validate_opening(rect: &OpeningRect) -> VesselResult<()> {
    for (v, what) in [
        (rect.left, "opening.left"),
        (rect.right, "opening.right"),
        (rect.bottom, "opening.bottom"),
        (rect.top, "opening.top"),
    ] {
        ensure_finite(v, what)?;
    }
    if rect.right <= rect.left {
        return Err(VesselError::InvalidOpening {
            reason: "right must be greater than left",
        });
    }
    if rect.top <= rect.bottom {
        return Err(VesselError::InvalidOpening {
            reason: "top must be greater than bottom",
        });
    }
    Ok(())
}

pub(crate) fn validate_fraction(v: Real, what: &'static str) -> VesselResult<Real> {
    if !(0.0..=1.0).contains(&v) {
        return Err(VesselError::InvalidParameter { what, value: v });
    }
    Ok(v)
}

pub(crate) fn validate_non_negative(v: Real, what: &'static str) -> VesselResult<Real> {
    if !v.is_finite() || v < 0.0 {
        return Err(VesselError::InvalidParameter { what, value: v });
    }
    Ok(v)
}
