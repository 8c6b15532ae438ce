mod deposit;
mod diffuse;
mod movement;
mod sense;
