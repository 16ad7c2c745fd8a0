fn main() { factorlab_tasks::entry_points::invert(); }
