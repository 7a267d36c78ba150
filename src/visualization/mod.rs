pub mod balloon_vis2d;
