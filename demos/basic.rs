use cinematch::{ItemRecord, Model, ModelConfig};

fn main() {
    // build catalog
    let items = vec![
        ItemRecord::new("Inception")
            .with_genres("Sci-Fi Thriller")
            .with_overview("A thief steals secrets through dream-sharing")
            .with_cast("DiCaprio Page Hardy")
            .with_director("Nolan"),
        ItemRecord::new("Interstellar")
            .with_genres("Sci-Fi Drama")
            .with_overview("Explorers travel through a wormhole to save humanity")
            .with_cast("McConaughey Hathaway")
            .with_director("Nolan"),
        ItemRecord::new("Heat")
            .with_genres("Crime Thriller")
            .with_overview("A crew of thieves is hunted by a detective")
            .with_cast("Pacino De Niro")
            .with_director("Mann"),
        ItemRecord::new("Before Sunrise")
            .with_genres("Romance Drama")
            .with_overview("Two strangers share one night of conversation")
            .with_cast("Hawke Delpy")
            .with_director("Linklater"),
    ];

    let model = Model::build(items, ModelConfig::default().with_clusters(2));

    // lookup is case-insensitive
    let hits = model.similar("inception").expect("title is in the catalog");
    println!("similar to Inception:\n{hits}");

    let view = model.cluster_of("Inception").expect("title is in the catalog");
    println!("cluster {} mates: {:?}", view.label, view.members);

    let score = model
        .pair_similarity("Inception", "Interstellar")
        .expect("titles are in the catalog");
    println!("Inception / Interstellar similarity: {score:.4}");
}
