//! Random page data grouped into teams, so rendering walks nested loops.

use rand::Rng;

#[derive(serde::Serialize)]
pub struct Page {
    pub title: String,
    pub teams: Vec<Team>,
}

#[derive(serde::Serialize)]
pub struct Team {
    pub name: String,
    pub members: Vec<Member>,
}

#[derive(serde::Serialize)]
pub struct Member {
    pub name: String,
    pub age: u32,
    pub is_disabled: bool,
}

fn word<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len).map(|_| rng.gen_range('a'..='z')).collect()
}

/// Generate a page with `teams` teams of `members` members each.
pub fn random(teams: usize, members: usize) -> Page {
    let mut rng = rand::thread_rng();
    let title = word(&mut rng, 20);
    let teams = (0..teams)
        .map(|_| Team {
            name: word(&mut rng, 12),
            members: (0..members)
                .map(|_| Member {
                    name: word(&mut rng, 20),
                    age: rng.gen_range(21..100),
                    is_disabled: rng.gen_ratio(1, 4),
                })
                .collect(),
        })
        .collect();
    Page { title, teams }
}
