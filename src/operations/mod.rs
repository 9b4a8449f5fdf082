mod cut_window;
mod radial_split;
mod revolve;

pub use cut_window::{
    damped_offset, station_curvature, window_corners, CutWindow, CLEARANCE, CURVATURE_DAMPING,
    WINDOW_THICKNESS,
};
pub use radial_split::RadialSplit;
pub use revolve::{clearance_angle_deg, Revolve};
