mod particle_ops;
mod type_color;
mod updated;
