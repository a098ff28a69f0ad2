pub mod streamlines;
pub mod efsim_vis2d;
